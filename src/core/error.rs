use thiserror::Error;

/// Errors surfaced by the table engine.
///
/// Only the configuration error is fatal to a table instance: it blocks
/// construction and the presentation layer renders it in place of the table.
/// Everything else in the engine degrades without erroring (clamped
/// navigation, empty states, no-match filters).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A table instance was configured with an empty, whitespace, or
    /// reserved (`default`) name. Proceeding would collide with other
    /// tables sharing the store under the same key, so this is a hard
    /// precondition failure rather than something to retry.
    #[error(
        "table name {0:?} is invalid: a unique, non-empty name other than `default` is required"
    )]
    InvalidTableName(String),
}
