pub mod error;
pub mod query;
pub mod store;
pub mod types;

pub use error::TableError;
pub use query::QueryDescriptor;
pub use store::{SharedTableStore, TableState, TableStore, TableStoreImpl};
pub use types::{FieldMap, Row, RowId, SortOrder, TableName, RESERVED_TABLE_NAME};
