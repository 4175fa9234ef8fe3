//! Client-side search over row field maps.
//!
//! The filter is a pure, synchronous function; the 500ms settle window that
//! bounds how often it runs lives upstream in [`crate::services::debounce`].

use serde_json::Value;
use std::sync::Arc;

use crate::core::types::{value_to_display_string, Row};

/// Filter rows by a case-insensitive substring query.
///
/// A query that trims to empty returns the input `Arc` unchanged, so the
/// store's identity-skip optimization still sees the same allocation. When
/// `search_fields` is empty the query is matched against every field on the
/// row (full-row fallback); otherwise only the named fields are consulted,
/// in the order supplied, short-circuiting on the first match either way.
///
/// Missing fields and JSON nulls never match. Row order is preserved.
pub fn filter_rows(rows: &Arc<Vec<Row>>, query: &str, search_fields: &[String]) -> Arc<Vec<Row>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Arc::clone(rows);
    }

    let matched = rows
        .iter()
        .filter(|row| row_matches(row, &query, search_fields))
        .cloned()
        .collect();
    Arc::new(matched)
}

fn row_matches(row: &Row, query_lower: &str, search_fields: &[String]) -> bool {
    if search_fields.is_empty() {
        return row
            .fields
            .values()
            .any(|value| value_matches(value, query_lower));
    }
    search_fields.iter().any(|field| {
        row.field(field)
            .is_some_and(|value| value_matches(value, query_lower))
    })
}

fn value_matches(value: &Value, query_lower: &str) -> bool {
    if value.is_null() {
        return false;
    }
    value_to_display_string(value)
        .to_lowercase()
        .contains(query_lower)
}
