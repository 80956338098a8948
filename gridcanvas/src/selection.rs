use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// A row field value, as seen by key matching and selection flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl FieldValue {
    /// Loose truthiness used by flag fields: `Null`, `false`, `0` and `""` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Str(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(String::from(v))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Named field lookup on a row.
///
/// Map-like rows get this for free; plain structs implement it by matching on the name.
pub trait RowFields {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

impl RowFields for BTreeMap<String, FieldValue> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

#[cfg(feature = "std")]
impl<S: core::hash::BuildHasher> RowFields for std::collections::HashMap<String, FieldValue, S> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

/// An entry of an explicit selection list: the row's key value plus its state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedRow {
    pub key: FieldValue,
    pub is_selected: bool,
}

impl SelectedRow {
    pub fn new(key: impl Into<FieldValue>, is_selected: bool) -> Self {
        Self {
            key: key.into(),
            is_selected,
        }
    }
}

/// Selection descriptor used when no explicit selection list is configured.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowSelection {
    /// Selected row positions.
    Indexes(Vec<usize>),
    /// A boolean-ish field on each row carries the selection.
    IsSelectedKey(String),
    /// Rows whose `row_key` field value is one of `values`.
    Keys {
        row_key: String,
        values: Vec<FieldValue>,
    },
}

impl RowSelection {
    fn is_selected<R: RowFields + ?Sized>(&self, index: usize, row: &R) -> bool {
        match self {
            Self::Indexes(indexes) => indexes.contains(&index),
            Self::IsSelectedKey(key) => row.field(key).is_some_and(|v| v.is_truthy()),
            Self::Keys { row_key, values } => row
                .field(row_key)
                .is_some_and(|v| values.contains(&v)),
        }
    }
}

/// Resolves per-row selection from whichever selection model is configured.
///
/// An explicit list (`selected_rows`) wins over `row_selection` whenever it is present, even if it
/// is empty. Exactly one strategy is consulted per call.
#[derive(Clone, Copy, Debug)]
pub struct RowSelectionResolver<'a> {
    pub selected_rows: Option<&'a [SelectedRow]>,
    pub row_key: Option<&'a str>,
    pub row_selection: Option<&'a RowSelection>,
}

impl RowSelectionResolver<'_> {
    pub fn is_row_selected<R: RowFields + ?Sized>(&self, index: usize, row: &R) -> bool {
        if let Some(list) = self.selected_rows {
            let Some(row_key) = self.row_key else {
                return false;
            };
            let Some(value) = row.field(row_key) else {
                return false;
            };
            return list
                .iter()
                .find(|entry| entry.key == value)
                .is_some_and(|entry| entry.is_selected);
        }

        if let Some(selection) = self.row_selection {
            return selection.is_selected(index, row);
        }

        false
    }
}
