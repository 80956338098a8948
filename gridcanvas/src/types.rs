use alloc::string::String;

/// The row and column index ranges an owner asks the canvas to materialize.
///
/// All `*_end` fields are exclusive. A well-formed window satisfies
/// `display_start <= visible_start <= visible_end <= display_end <= rows_count`, and the same
/// chain for the column fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub display_start: usize,
    pub display_end: usize,
    pub visible_start: usize,
    pub visible_end: usize,
    pub col_display_start: usize,
    pub col_display_end: usize,
    pub col_visible_start: usize,
    pub col_visible_end: usize,
}

impl Window {
    /// A window displaying (and showing) the rows `start..end`, with no column range.
    pub fn rows(start: usize, end: usize) -> Self {
        Self {
            display_start: start,
            display_end: end,
            visible_start: start,
            visible_end: end,
            ..Self::default()
        }
    }

    pub fn with_visible(mut self, visible_start: usize, visible_end: usize) -> Self {
        self.visible_start = visible_start;
        self.visible_end = visible_end;
        self
    }

    pub fn with_columns(
        mut self,
        col_display_start: usize,
        col_display_end: usize,
        col_visible_start: usize,
        col_visible_end: usize,
    ) -> Self {
        self.col_display_start = col_display_start;
        self.col_display_end = col_display_end;
        self.col_visible_start = col_visible_start;
        self.col_visible_end = col_visible_end;
        self
    }

    /// Returns the display range of rows.
    pub fn display_range(&self) -> RowRange {
        RowRange {
            start: self.display_start,
            end: self.display_end,
        }
    }

    /// Checks the row and column ordering invariants against `rows_count`.
    pub fn is_well_formed(&self, rows_count: usize) -> bool {
        self.display_start <= self.visible_start
            && self.visible_start <= self.visible_end
            && self.visible_end <= self.display_end
            && self.display_end <= rows_count
            && self.col_display_start <= self.col_visible_start
            && self.col_visible_start <= self.col_visible_end
            && self.col_visible_end <= self.col_display_end
    }
}

/// Cached scroll offsets of the canvas surface, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub scroll_top: u64,
    pub scroll_left: u64,
}

/// A range of row indexes (`end` is exclusive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A grid column, as far as the canvas is concerned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    pub key: String,
    pub name: String,
    pub width: u32,
}

impl Column {
    pub fn new(key: impl Into<String>, width: u32) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            width,
        }
    }
}

/// Tree details attached to a realized row by the sub-row resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubRowDetails {
    pub can_expand: bool,
    pub expanded: bool,
    /// The column that owns the expand toggle.
    pub field: Option<String>,
    pub children_count: usize,
    pub tree_depth: u32,
    pub sibling_index: usize,
    pub number_siblings: usize,
}

/// Metadata of a group header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupMeta {
    pub name: String,
    pub column_name: String,
    pub display_name: String,
    pub tree_depth: u32,
    pub is_expanded: bool,
}

/// A snapshot of canvas geometry handed to row-specific renderers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasInfo {
    pub window: Window,
    pub row_height: u32,
    pub height: u32,
    pub rows_count: usize,
    pub is_scrolling: bool,
}
