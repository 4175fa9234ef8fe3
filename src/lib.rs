#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_match)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod controller;
pub mod core;
pub mod logging;
pub mod services;
pub mod tui;

// Re-export commonly used types
pub use controller::{
    PageState, PaginationMode, TableController, TableEvent, TableOptions, DEFAULT_PAGE_SIZE,
};
pub use core::{QueryDescriptor, Row, RowId, SharedTableStore, SortOrder, TableError, TableName};
pub use services::{filter_rows, sort_rows, Debouncer, SortSpec, SEARCH_DEBOUNCE};
