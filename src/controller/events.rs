use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::types::Row;

/// Outbound notifications a table instance sends to its owner.
///
/// Events are emitted synchronously, in the same turn as the state change
/// that caused them, through the unbounded channel registered at
/// construction. In server-driven mode the page/search requests are the
/// only way the controller asks for new data; it never mutates its own view
/// of the page until the owner answers with a fresh `QueryDescriptor`.
#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize)]
pub enum TableEvent {
    /// Server mode: the user asked for another page (1-based, pre-clamped)
    PageChangeRequested { page: u32 },
    /// Server mode: the user picked a different page size
    PageSizeChangeRequested { size: usize },
    /// Server mode: the debounced search input settled; `query` is trimmed
    SearchChanged { query: String },
    /// The materialized row selection changed
    RowSelectionChanged { rows: Vec<Row> },
    /// A row was clicked/activated
    RowClicked { row: Row },
    /// A row action was dispatched from the row's action menu
    RowAction { action_id: String, row: Row },
}
