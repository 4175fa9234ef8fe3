use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use strum::Display;

use crate::core::error::TableError;

/// Field name to value mapping for one record. Insertion order is preserved
/// (serde_json `preserve_order`), so full-row search scans fields in the
/// order the caller supplied them.
pub type FieldMap = serde_json::Map<String, Value>;

/// Name reserved by the engine; a live table instance must never use it.
pub const RESERVED_TABLE_NAME: &str = "default";

/// Stable identifier for a row, used for selection tracking.
///
/// Ids are caller-supplied and must stay stable for the lifetime of the
/// logical record, including across server-mode page changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(String);

impl RowId {
    /// Create a new row id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<usize> for RowId {
    fn from(index: usize) -> Self {
        Self(index.to_string())
    }
}

/// One record of a dataset: a stable id plus an opaque field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub fields: FieldMap,
}

impl Row {
    /// Create a new row from an id and its field map
    pub fn new(id: impl Into<RowId>, fields: FieldMap) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Get a field value by name, if present
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get the display string for a field.
    ///
    /// Missing fields and JSON nulls render as the empty string.
    pub fn display_value(&self, name: &str) -> String {
        self.field(name)
            .map(value_to_display_string)
            .unwrap_or_default()
    }

    /// Field names in their preserved order
    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}

/// Convert a JSON value into the string a cell displays
pub fn value_to_display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Partition key for the shared table store.
///
/// A valid name is non-empty, non-whitespace, and not the reserved
/// `default`; names are case-sensitive. Constructing one is the hard
/// precondition every table instance must pass before it may touch the
/// shared store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableName(String);

impl TableName {
    /// Validate and create a table name
    pub fn new(name: impl Into<String>) -> Result<Self, TableError> {
        let name = name.into();
        if name.trim().is_empty() || name == RESERVED_TABLE_NAME {
            return Err(TableError::InvalidTableName(name));
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TableName {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Direction of a column sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    /// Next direction when the same column is activated again.
    ///
    /// First activation sorts ascending; activating again flips.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending | SortOrder::None => SortOrder::Ascending,
        }
    }
}
