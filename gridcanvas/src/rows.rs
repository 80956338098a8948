use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::SubRowDetails;

/// Resolves tree details for a row (children count, depth, expand state).
pub type SubRowResolver<R> = Arc<dyn Fn(&R) -> SubRowDetails + Send + Sync>;

/// Where realized rows come from.
pub enum RowSource<R> {
    /// A finite, random-access sequence. Windows are taken by slicing.
    Slice(Arc<[R]>),
    /// A generator invoked once per realized index.
    Generator(Arc<dyn Fn(usize) -> R + Send + Sync>),
}

impl<R> RowSource<R> {
    pub fn from_vec(rows: Vec<R>) -> Self {
        Self::Slice(rows.into())
    }

    pub fn from_fn(f: impl Fn(usize) -> R + Send + Sync + 'static) -> Self {
        Self::Generator(Arc::new(f))
    }

    /// The source length, when it has one.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            Self::Slice(rows) => Some(rows.len()),
            Self::Generator(_) => None,
        }
    }
}

impl<R: Clone> RowSource<R> {
    /// Materializes `[start, end)`.
    ///
    /// Slices clamp the range to their length; generators are called for every index in range.
    /// `sub_rows` runs once per produced row when configured.
    pub fn window(
        &self,
        start: usize,
        end: usize,
        sub_rows: Option<&SubRowResolver<R>>,
    ) -> Vec<RealizedRow<R>> {
        let attach = |row: R| {
            let sub_row_details = sub_rows.map(|f| f(&row)).unwrap_or_default();
            RealizedRow {
                row,
                sub_row_details,
            }
        };

        match self {
            Self::Slice(rows) => {
                let end = end.min(rows.len());
                let start = start.min(end);
                rows[start..end].iter().cloned().map(attach).collect()
            }
            Self::Generator(f) => (start..end).map(|i| attach(f(i))).collect(),
        }
    }
}

impl<R> Clone for RowSource<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Slice(rows) => Self::Slice(Arc::clone(rows)),
            Self::Generator(f) => Self::Generator(Arc::clone(f)),
        }
    }
}

impl<R> core::fmt::Debug for RowSource<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Slice(rows) => f.debug_tuple("Slice").field(&rows.len()).finish(),
            Self::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// A row produced for the current window, before it is handed to a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct RealizedRow<R> {
    pub row: R,
    pub sub_row_details: SubRowDetails,
}
