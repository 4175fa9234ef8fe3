use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::types::Row;

/// Metadata for a registered table
#[derive(Debug, Clone)]
pub struct TableMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Shared state for one named table.
///
/// `filtered_data` is the post-search view and defaults to `original_data`;
/// in server-driven mode the two are defined to be equal. `selected_rows`
/// holds the materialized selection so that other consumers of the same
/// table name (a toolbar showing "N selected") can read it without access
/// to the owning controller.
#[derive(Debug, Clone)]
pub struct TableState {
    pub original_data: Arc<Vec<Row>>,
    pub filtered_data: Arc<Vec<Row>>,
    pub selected_rows: Vec<Row>,
    pub selected_cols: Vec<String>,
    pub metadata: TableMetadata,
}

impl TableState {
    fn empty(name: &str) -> Self {
        let now = Utc::now();
        Self {
            original_data: Arc::new(Vec::new()),
            filtered_data: Arc::new(Vec::new()),
            selected_rows: Vec::new(),
            selected_cols: Vec::new(),
            metadata: TableMetadata {
                name: name.to_string(),
                created: now,
                modified: now,
            },
        }
    }

    fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }
}

/// Trait for the named table store.
///
/// Every operation is a synchronous, whole-value replace; none of them
/// fail. Mutating an unknown name implicitly registers it with defaults
/// first, while the clear/reset operations on an unknown name are no-ops.
pub trait TableStore {
    /// Get or create the state for a table name, returning a snapshot.
    fn register(&mut self, name: &str) -> TableState;
    /// Get a reference to a table's state, if registered.
    fn get(&self, name: &str) -> Option<&TableState>;
    /// Replace the original dataset. Skipped when `rows` is the same
    /// allocation as the stored one (see `SharedTableStore` docs).
    fn set_original_data(&mut self, name: &str, rows: Arc<Vec<Row>>);
    /// Replace the filtered dataset unconditionally.
    fn set_filtered_data(&mut self, name: &str, rows: Arc<Vec<Row>>);
    /// Replace the materialized row selection.
    fn set_selected_rows(&mut self, name: &str, rows: Vec<Row>);
    /// Clear the row selection.
    fn clear_selected_rows(&mut self, name: &str);
    /// Replace the selected/visible column ids.
    fn set_selected_cols(&mut self, name: &str, cols: Vec<String>);
    /// Clear the column selection.
    fn clear_selected_cols(&mut self, name: &str);
    /// Restore `filtered_data := original_data` and clear both selections.
    fn reset_table(&mut self, name: &str);
    /// Drop every entry.
    fn reset_all(&mut self);
    /// Names of all registered tables.
    fn table_names(&self) -> Vec<String>;
}

/// Concrete store over a BTreeMap keyed by table name
#[derive(Debug, Default)]
pub struct TableStoreImpl {
    tables: BTreeMap<String, TableState>,
}

impl TableStoreImpl {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    fn entry(&mut self, name: &str) -> &mut TableState {
        self.tables
            .entry(name.to_string())
            .or_insert_with(|| TableState::empty(name))
    }
}

impl TableStore for TableStoreImpl {
    fn register(&mut self, name: &str) -> TableState {
        self.entry(name).clone()
    }

    fn get(&self, name: &str) -> Option<&TableState> {
        self.tables.get(name)
    }

    fn set_original_data(&mut self, name: &str, rows: Arc<Vec<Row>>) {
        if let Some(existing) = self.tables.get(name)
            && Arc::ptr_eq(&existing.original_data, &rows)
        {
            return;
        }
        let state = self.entry(name);
        state.original_data = rows;
        state.touch();
    }

    fn set_filtered_data(&mut self, name: &str, rows: Arc<Vec<Row>>) {
        let state = self.entry(name);
        state.filtered_data = rows;
        state.touch();
    }

    fn set_selected_rows(&mut self, name: &str, rows: Vec<Row>) {
        let state = self.entry(name);
        state.selected_rows = rows;
        state.touch();
    }

    fn clear_selected_rows(&mut self, name: &str) {
        if let Some(state) = self.tables.get_mut(name) {
            state.selected_rows.clear();
            state.touch();
        }
    }

    fn set_selected_cols(&mut self, name: &str, cols: Vec<String>) {
        let state = self.entry(name);
        state.selected_cols = cols;
        state.touch();
    }

    fn clear_selected_cols(&mut self, name: &str) {
        if let Some(state) = self.tables.get_mut(name) {
            state.selected_cols.clear();
            state.touch();
        }
    }

    fn reset_table(&mut self, name: &str) {
        if let Some(state) = self.tables.get_mut(name) {
            state.filtered_data = state.original_data.clone();
            state.selected_rows.clear();
            state.selected_cols.clear();
            state.touch();
        }
    }

    fn reset_all(&mut self) {
        self.tables.clear();
    }

    fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }
}

/// Dependency-injected handle to the shared table store.
///
/// Constructed once per application root and cloned by reference into each
/// table instance; entries are keyed by table name, so distinct tables never
/// interfere. Reads return snapshots; writes are whole-value replaces with
/// last-writer-wins consistency per key.
///
/// The identity-skip optimization in `set_original_data` compares by
/// `Arc::ptr_eq`: a caller that wants redundant downstream recomputation
/// skipped must hand back the same `Arc` allocation for unchanged data. A
/// caller that rebuilds its row vector on every refresh simply never
/// triggers the skip.
#[derive(Debug, Clone, Default)]
pub struct SharedTableStore {
    inner: Arc<Mutex<TableStoreImpl>>,
}

impl SharedTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Store writes are whole-value replaces, so a registry abandoned
    // mid-panic is still consistent; recover instead of propagating poison.
    fn lock(&self) -> MutexGuard<'_, TableStoreImpl> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get or create the state for a table name, returning a snapshot
    pub fn register(&self, name: &str) -> TableState {
        self.lock().register(name)
    }

    /// Snapshot of a table's state, if registered
    pub fn state(&self, name: &str) -> Option<TableState> {
        self.lock().get(name).cloned()
    }

    pub fn set_original_data(&self, name: &str, rows: Arc<Vec<Row>>) {
        self.lock().set_original_data(name, rows);
    }

    pub fn set_filtered_data(&self, name: &str, rows: Arc<Vec<Row>>) {
        self.lock().set_filtered_data(name, rows);
    }

    pub fn set_selected_rows(&self, name: &str, rows: Vec<Row>) {
        self.lock().set_selected_rows(name, rows);
    }

    pub fn clear_selected_rows(&self, name: &str) {
        self.lock().clear_selected_rows(name);
    }

    pub fn set_selected_cols(&self, name: &str, cols: Vec<String>) {
        self.lock().set_selected_cols(name, cols);
    }

    pub fn clear_selected_cols(&self, name: &str) {
        self.lock().clear_selected_cols(name);
    }

    pub fn reset_table(&self, name: &str) {
        self.lock().reset_table(name);
    }

    pub fn reset_all(&self) {
        self.lock().reset_all();
    }

    pub fn table_names(&self) -> Vec<String> {
        self.lock().table_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rows(ids: &[&str]) -> Arc<Vec<Row>> {
        Arc::new(
            ids.iter()
                .map(|id| {
                    let mut fields = FieldMap::new();
                    fields.insert("id".to_string(), json!(*id));
                    Row::new(*id, fields)
                })
                .collect(),
        )
    }

    #[test]
    fn test_register_creates_default_state() {
        let store = SharedTableStore::new();
        let state = store.register("users");
        assert!(state.original_data.is_empty());
        assert!(state.filtered_data.is_empty());
        assert!(state.selected_rows.is_empty());
        assert!(state.selected_cols.is_empty());
        assert_eq!(state.metadata.name, "users");
    }

    #[test]
    fn test_set_original_data_skips_identical_reference() {
        let store = SharedTableStore::new();
        let data = rows(&["a", "b"]);
        store.set_original_data("users", data.clone());
        let before = store.state("users").unwrap().metadata.modified;

        // Same allocation: skipped, modified timestamp untouched
        store.set_original_data("users", data.clone());
        let after = store.state("users").unwrap().metadata.modified;
        assert_eq!(before, after);

        // Equal contents but a new allocation: replaced
        let rebuilt = rows(&["a", "b"]);
        store.set_original_data("users", rebuilt.clone());
        let state = store.state("users").unwrap();
        assert!(Arc::ptr_eq(&state.original_data, &rebuilt));
    }

    #[test]
    fn test_registry_isolation_between_names() {
        let store = SharedTableStore::new();
        store.set_original_data("a", rows(&["1", "2"]));
        store.set_original_data("b", rows(&["x"]));
        store.set_selected_cols("a", vec!["name".to_string()]);

        let b = store.state("b").unwrap();
        assert_eq!(b.original_data.len(), 1);
        assert!(b.selected_cols.is_empty());

        store.reset_table("a");
        let b = store.state("b").unwrap();
        assert_eq!(b.original_data.len(), 1);
    }

    #[test]
    fn test_reset_table_is_idempotent() {
        let store = SharedTableStore::new();
        let data = rows(&["1", "2", "3"]);
        store.set_original_data("users", data.clone());
        store.set_filtered_data("users", rows(&["1"]));
        store.set_selected_rows("users", data.as_ref().clone());
        store.set_selected_cols("users", vec!["id".to_string()]);

        store.reset_table("users");
        let once = store.state("users").unwrap();
        assert!(Arc::ptr_eq(&once.original_data, &once.filtered_data));
        assert!(once.selected_rows.is_empty());
        assert!(once.selected_cols.is_empty());

        store.reset_table("users");
        let twice = store.state("users").unwrap();
        assert!(Arc::ptr_eq(&twice.original_data, &twice.filtered_data));
        assert!(twice.selected_rows.is_empty());
        assert!(twice.selected_cols.is_empty());
    }

    #[test]
    fn test_reset_unknown_name_is_noop() {
        let store = SharedTableStore::new();
        store.reset_table("ghost");
        store.clear_selected_rows("ghost");
        store.clear_selected_cols("ghost");
        assert!(store.state("ghost").is_none());
    }

    #[test]
    fn test_mutation_on_unknown_name_registers_defaults() {
        let store = SharedTableStore::new();
        store.set_filtered_data("late", rows(&["1"]));
        let state = store.state("late").unwrap();
        assert!(state.original_data.is_empty());
        assert_eq!(state.filtered_data.len(), 1);
    }

    #[test]
    fn test_reset_all_drops_everything() {
        let store = SharedTableStore::new();
        store.register("a");
        store.register("b");
        assert_eq!(store.table_names(), vec!["a", "b"]);
        store.reset_all();
        assert!(store.table_names().is_empty());
    }
}
