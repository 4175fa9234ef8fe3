//! In-memory sorting for client-driven tables.

use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::types::{value_to_display_string, Row, SortOrder};

/// A single-column sort instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Toggle sorting for a column against the previous spec.
    ///
    /// First activation sorts ascending; activating the same column again
    /// reverses the direction. Switching columns starts ascending.
    pub fn toggle(previous: Option<&SortSpec>, field: &str) -> Self {
        match previous {
            Some(prev) if prev.field == field => Self::new(field, prev.order.toggled()),
            _ => Self::new(field, SortOrder::Ascending),
        }
    }
}

/// Sort rows by the spec's field, stably, returning a new allocation.
///
/// A spec with `SortOrder::None` returns the input unchanged. Missing and
/// null values group at the ascending end, matching how the in-memory
/// pipeline treats an absent field as the smallest value.
pub fn sort_rows(rows: &Arc<Vec<Row>>, spec: &SortSpec) -> Arc<Vec<Row>> {
    if spec.order == SortOrder::None {
        return Arc::clone(rows);
    }

    let mut sorted: Vec<Row> = rows.as_ref().clone();
    sorted.sort_by(|a, b| {
        let ordering = compare_values(a.field(&spec.field), b.field(&spec.field));
        match spec.order {
            SortOrder::Descending => ordering.reverse(),
            _ => ordering,
        }
    });
    Arc::new(sorted)
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => compare_strings(a, b),
        // Mixed or structured types fall back to their display form
        (a, b) => compare_strings(&value_to_display_string(a), &value_to_display_string(b)),
    }
}

fn compare_strings(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
