pub mod debounce;
pub mod filter;
pub mod sort;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use filter::filter_rows;
pub use sort::{sort_rows, SortSpec};
