//! Mode-dispatching table controller.
//!
//! One `TableController` per mounted table instance. It decides, once at
//! construction, whether sorting/filtering/pagination are computed in-memory
//! (client-driven) or delegated to an external data source through outbound
//! events (server-driven), and it reconciles debounced search input,
//! page-index resets, and selection tracking against the shared named store.

pub mod events;
pub mod pagination;
pub mod selection;

pub use events::TableEvent;
pub use pagination::{ClientPagination, PaginationMode};
pub use selection::SelectionTracker;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::core::error::TableError;
use crate::core::query::QueryDescriptor;
use crate::core::store::SharedTableStore;
use crate::core::types::{Row, RowId, TableName};
use crate::services::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::services::filter::filter_rows;
use crate::services::sort::{sort_rows, SortSpec};

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default choices for the page-size selector
pub const PAGE_SIZE_PRESETS: [usize; 5] = [10, 20, 30, 40, 50];

/// Configuration for one table instance
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Partition key into the shared store; must be unique per mounted table
    pub table_name: String,
    /// Fields consulted by search; empty means full-row fallback
    pub search_fields: Vec<String>,
    /// Rows per page (client mode; server mode reads the descriptor's limit)
    pub page_size: usize,
    /// Choices offered by the page-size selector
    pub page_size_options: Vec<usize>,
    /// Present iff the table is server-driven
    pub query: Option<QueryDescriptor>,
    /// Quiet window for search input
    pub debounce: Duration,
}

impl TableOptions {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            search_fields: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_PRESETS.to_vec(),
            query: None,
            debounce: SEARCH_DEBOUNCE,
        }
    }

    pub fn search_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Supplying a descriptor switches the instance to server-driven mode
    pub fn query(mut self, query: QueryDescriptor) -> Self {
        self.query = Some(query);
        self
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// Mode-independent snapshot of the current page state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// 0-based current page
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Rows in the current row model (filtered set, or the server batch)
    pub total_rows: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

/// Reusable engine reconciling one table's visual state against its data
/// sourcing strategy.
///
/// Row selection and column visibility are always locally owned, whichever
/// mode pagination runs in. All state the controller derives is written
/// through to the [`SharedTableStore`] under this table's name, where other
/// components sharing the name can read it.
pub struct TableController {
    name: TableName,
    store: SharedTableStore,
    events: UnboundedSender<TableEvent>,
    mode: PaginationMode,
    search_fields: Vec<String>,
    page_size_options: Vec<usize>,
    original: Arc<Vec<Row>>,
    filtered: Arc<Vec<Row>>,
    sort: Option<SortSpec>,
    hidden_cols: BTreeSet<String>,
    debouncer: Debouncer,
    selection: SelectionTracker,
    search_input_text: String,
    applied_search: String,
}

impl TableController {
    /// Create a controller for one table instance.
    ///
    /// Fails with [`TableError::InvalidTableName`] when the name is empty,
    /// whitespace, or the reserved `default`. Proceeding would write into
    /// the shared store under a key that collides with every other
    /// misconfigured table, so nothing is registered in that case.
    pub fn new(
        options: TableOptions,
        store: SharedTableStore,
        events: UnboundedSender<TableEvent>,
    ) -> Result<Self, TableError> {
        let name = TableName::new(options.table_name)?;
        let mode = match options.query {
            Some(query) => PaginationMode::Server(query),
            None => PaginationMode::Client(ClientPagination::new(options.page_size)),
        };
        store.register(name.as_str());
        debug!(
            table = %name,
            server_driven = matches!(mode, PaginationMode::Server(_)),
            "table instance registered"
        );

        Ok(Self {
            name,
            store,
            events,
            mode,
            search_fields: options.search_fields,
            page_size_options: options.page_size_options,
            original: Arc::new(Vec::new()),
            filtered: Arc::new(Vec::new()),
            sort: None,
            hidden_cols: BTreeSet::new(),
            debouncer: Debouncer::new(options.debounce),
            selection: SelectionTracker::new(),
            search_input_text: String::new(),
            applied_search: String::new(),
        })
    }

    pub fn table_name(&self) -> &TableName {
        &self.name
    }

    pub fn mode(&self) -> &PaginationMode {
        &self.mode
    }

    pub fn is_server_driven(&self) -> bool {
        matches!(self.mode, PaginationMode::Server(_))
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    // ---- data ----

    /// Supply the current dataset (full set in client mode, one page's batch
    /// in server mode).
    ///
    /// Handing back the same `Arc` allocation as last time is a no-op, which
    /// is also the store's identity-skip contract. A new allocation replaces
    /// the dataset, recomputes the filtered view, and (client mode) resets
    /// to the first page.
    pub fn set_data(&mut self, rows: Arc<Vec<Row>>) {
        if Arc::ptr_eq(&self.original, &rows) {
            return;
        }
        self.original = rows.clone();
        self.store.set_original_data(self.name.as_str(), rows);

        if self.is_server_driven() {
            // No local filtering: the filtered view is the batch itself
            self.filtered = self.original.clone();
            self.store
                .set_filtered_data(self.name.as_str(), self.filtered.clone());
        } else {
            self.refresh_filtered();
            if let PaginationMode::Client(paging) = &mut self.mode {
                paging.reset();
            }
        }
        // Keep the store's materialized selection consistent with the new
        // row model; ids stay tracked even when their rows left the window.
        self.store
            .set_selected_rows(self.name.as_str(), self.selected_rows());
    }

    fn refresh_filtered(&mut self) {
        self.filtered = filter_rows(&self.original, &self.applied_search, &self.search_fields);
        self.store
            .set_filtered_data(self.name.as_str(), self.filtered.clone());
    }

    // ---- search ----

    /// Record a keystroke of search input; applied after the quiet window
    pub fn search_input(&mut self, text: &str, now: Instant) {
        self.search_input_text = text.to_string();
        self.debouncer.input(text, now);
    }

    /// The raw (un-debounced) input text, for echoing in the search box
    pub fn search_text(&self) -> &str {
        &self.search_input_text
    }

    /// The query currently applied to the row model
    pub fn applied_search(&self) -> &str {
        &self.applied_search
    }

    /// Advance time. Applies a settled search once 500ms (or the configured
    /// window) have passed since the last keystroke.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.apply_search(&query);
        }
    }

    fn apply_search(&mut self, query: &str) {
        let trimmed = query.trim().to_string();
        if trimmed == self.applied_search {
            return;
        }
        self.applied_search = trimmed.clone();

        if self.is_server_driven() {
            // The external owner filters; we only announce the new query
            self.emit(TableEvent::SearchChanged { query: trimmed });
        } else {
            self.refresh_filtered();
            if let PaginationMode::Client(paging) = &mut self.mode {
                paging.reset();
            }
        }
    }

    // ---- pagination ----

    /// Uniform page-state view, whichever mode the instance runs in
    pub fn page_state(&self) -> PageState {
        match &self.mode {
            PaginationMode::Client(paging) => {
                let total = self.filtered.len();
                PageState {
                    page_index: paging.page_index,
                    page_size: paging.page_size,
                    page_count: paging.page_count(total),
                    total_rows: total,
                    can_previous: paging.can_previous(),
                    can_next: paging.can_next(total),
                }
            }
            PaginationMode::Server(query) => PageState {
                page_index: query.page_index(),
                page_size: query.limit as usize,
                page_count: query.last_page as usize,
                total_rows: self.filtered.len(),
                can_previous: query.can_previous(),
                can_next: query.can_next(),
            },
        }
    }

    /// Advance one page; boundary no-op in client mode, outbound request in
    /// server mode
    pub fn next_page(&mut self) {
        let total = self.filtered.len();
        let event = match &mut self.mode {
            PaginationMode::Client(paging) => {
                paging.next_page(total);
                None
            }
            PaginationMode::Server(query) => query
                .can_next()
                .then(|| TableEvent::PageChangeRequested {
                    page: query.page + 1,
                }),
        };
        if let Some(event) = event {
            self.emit(event);
        }
    }

    /// Step back one page; boundary no-op in client mode, outbound request
    /// in server mode
    pub fn previous_page(&mut self) {
        let event = match &mut self.mode {
            PaginationMode::Client(paging) => {
                paging.previous_page();
                None
            }
            PaginationMode::Server(query) => query
                .can_previous()
                .then(|| TableEvent::PageChangeRequested {
                    page: query.page - 1,
                }),
        };
        if let Some(event) = event {
            self.emit(event);
        }
    }

    /// Jump to a 1-based page, clamped silently into the valid range
    pub fn request_page(&mut self, page: i64) {
        let total = self.filtered.len();
        let event = match &mut self.mode {
            PaginationMode::Client(paging) => {
                paging.set_page_index(page - 1, total);
                None
            }
            PaginationMode::Server(query) => Some(TableEvent::PageChangeRequested {
                page: query.clamp_page(page),
            }),
        };
        if let Some(event) = event {
            self.emit(event);
        }
    }

    /// Change the page size; a request in server mode, local in client mode
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        let total = self.filtered.len();
        let event = match &mut self.mode {
            PaginationMode::Client(paging) => {
                paging.set_page_size(page_size, total);
                None
            }
            PaginationMode::Server(_) => {
                Some(TableEvent::PageSizeChangeRequested { size: page_size })
            }
        };
        if let Some(event) = event {
            self.emit(event);
        }
    }

    /// Replace the externally owned descriptor after a fetch completes.
    ///
    /// Last write wins: the controller does not sequence-number requests, so
    /// an owner that can observe out-of-order completions must sequence them
    /// itself before calling this.
    pub fn set_query_descriptor(&mut self, query: QueryDescriptor) {
        match &mut self.mode {
            PaginationMode::Server(current) => *current = query,
            PaginationMode::Client(_) => {
                // Mode is fixed per instance; a descriptor here is a caller bug
                warn!(table = %self.name, "query descriptor ignored on a client-driven table");
            }
        }
    }

    // ---- sorting ----

    /// Toggle sorting on a column: ascending first, flipped on repeat.
    ///
    /// Client mode only; in server mode the descriptor owner owns the sort
    /// and the local state is display-only.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.is_server_driven() {
            return;
        }
        self.sort = Some(SortSpec::toggle(self.sort.as_ref(), field));
    }

    /// Current sort binding for the header indicator
    pub fn sort_state(&self) -> Option<SortSpec> {
        match &self.mode {
            PaginationMode::Client(_) => self.sort.clone(),
            PaginationMode::Server(query) => query
                .sort_by
                .clone()
                .map(|field| SortSpec::new(field, query.sort_order)),
        }
    }

    // ---- row model ----

    /// Rows of the currently visible page window, in display order.
    ///
    /// Client mode recomputes filter, then sort, then the page slice over
    /// the full filtered set. Server mode returns the supplied batch as-is:
    /// the batch already is the page.
    pub fn page_rows(&self) -> Vec<Row> {
        match &self.mode {
            PaginationMode::Client(paging) => {
                let sorted = match &self.sort {
                    Some(spec) => sort_rows(&self.filtered, spec),
                    None => self.filtered.clone(),
                };
                sorted[paging.page_range(sorted.len())].to_vec()
            }
            PaginationMode::Server(_) => self.original.as_ref().clone(),
        }
    }

    /// The full post-search row model (server mode: the current batch)
    pub fn filtered_rows(&self) -> Arc<Vec<Row>> {
        self.filtered.clone()
    }

    // ---- selection ----

    /// Flip one row's selection
    pub fn toggle_row_selection(&mut self, id: &RowId) {
        self.selection.toggle(id.clone());
        self.publish_selection();
    }

    /// Select or deselect every row of the *current page* only
    pub fn toggle_all_page_rows(&mut self, selected: bool) {
        let page_ids: Vec<RowId> = self.page_rows().into_iter().map(|row| row.id).collect();
        self.selection.set_all(page_ids, selected);
        self.publish_selection();
    }

    pub fn is_row_selected(&self, id: &RowId) -> bool {
        self.selection.is_selected(id)
    }

    /// Selected rows materialized against the current row model
    pub fn selected_rows(&self) -> Vec<Row> {
        self.selection.materialize(&self.filtered)
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.publish_selection();
    }

    /// "N of M row(s) selected." line for toolbar consumers
    pub fn selection_summary(&self) -> String {
        format!(
            "{} of {} row(s) selected.",
            self.selected_rows().len(),
            self.filtered.len()
        )
    }

    fn publish_selection(&mut self) {
        let rows = self.selected_rows();
        self.store
            .set_selected_rows(self.name.as_str(), rows.clone());
        self.emit(TableEvent::RowSelectionChanged { rows });
    }

    // ---- columns ----

    /// All column names, from the dataset's first row
    pub fn all_columns(&self) -> Vec<String> {
        self.original
            .first()
            .map(|row| row.field_names())
            .unwrap_or_default()
    }

    /// Visible column names, in dataset order
    pub fn visible_columns(&self) -> Vec<String> {
        self.all_columns()
            .into_iter()
            .filter(|name| !self.hidden_cols.contains(name))
            .collect()
    }

    pub fn is_column_visible(&self, field: &str) -> bool {
        !self.hidden_cols.contains(field)
    }

    /// Show/hide a column, writing the visible set through to the store
    pub fn toggle_column(&mut self, field: &str) {
        if !self.hidden_cols.remove(field) {
            self.hidden_cols.insert(field.to_string());
        }
        self.store
            .set_selected_cols(self.name.as_str(), self.visible_columns());
    }

    /// Unhide every column
    pub fn show_all_columns(&mut self) {
        if self.hidden_cols.is_empty() {
            return;
        }
        self.hidden_cols.clear();
        self.store
            .set_selected_cols(self.name.as_str(), self.visible_columns());
    }

    // ---- row interaction ----

    /// Announce a row click to the owner
    pub fn row_clicked(&self, row: &Row) {
        self.emit(TableEvent::RowClicked { row: row.clone() });
    }

    /// Dispatch a row action (from the row's action menu) to the owner
    pub fn row_action(&self, action_id: &str, row: &Row) {
        self.emit(TableEvent::RowAction {
            action_id: action_id.to_string(),
            row: row.clone(),
        });
    }

    // ---- reset ----

    /// Restore the unfiltered, unsorted, unselected state
    pub fn reset(&mut self) {
        self.search_input_text.clear();
        self.applied_search.clear();
        self.debouncer.cancel();
        self.sort = None;
        self.hidden_cols.clear();
        self.store.reset_table(self.name.as_str());
        self.filtered = self.original.clone();
        self.store
            .set_filtered_data(self.name.as_str(), self.filtered.clone());
        if let PaginationMode::Client(paging) = &mut self.mode {
            paging.reset();
        }
        if !self.selection.is_empty() {
            self.selection.clear();
            self.publish_selection();
        }
    }

    fn emit(&self, event: TableEvent) {
        // The owner dropping its receiver mid-shutdown is not worth surfacing
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn person(id: usize, name: &str, role: &str) -> Row {
        let mut fields = FieldMap::new();
        fields.insert("name".to_string(), json!(name));
        fields.insert("role".to_string(), json!(role));
        Row::new(id, fields)
    }

    fn dataset(count: usize) -> Arc<Vec<Row>> {
        Arc::new(
            (0..count)
                .map(|i| {
                    let role = if i % 2 == 0 { "admin" } else { "viewer" };
                    person(i, &format!("user-{i:03}"), role)
                })
                .collect(),
        )
    }

    fn client_table(
        rows: Arc<Vec<Row>>,
    ) -> (TableController, UnboundedReceiver<TableEvent>) {
        let (tx, rx) = unbounded_channel();
        let mut controller =
            TableController::new(TableOptions::new("users"), SharedTableStore::new(), tx)
                .unwrap();
        controller.set_data(rows);
        (controller, rx)
    }

    fn server_table(
        rows: Arc<Vec<Row>>,
        query: QueryDescriptor,
    ) -> (TableController, UnboundedReceiver<TableEvent>) {
        let (tx, rx) = unbounded_channel();
        let mut controller = TableController::new(
            TableOptions::new("users").query(query),
            SharedTableStore::new(),
            tx,
        )
        .unwrap();
        controller.set_data(rows);
        (controller, rx)
    }

    #[test]
    fn test_client_pagination_bounds() {
        let (mut controller, _rx) = client_table(dataset(45));
        let state = controller.page_state();
        assert_eq!(state.page_count, 5);
        assert_eq!(state.page_index, 0);
        assert!(!state.can_previous);

        // previous at page 0 is a no-op
        controller.previous_page();
        assert_eq!(controller.page_state().page_index, 0);

        controller.request_page(5);
        assert_eq!(controller.page_state().page_index, 4);
        assert!(!controller.page_state().can_next);

        // next at the last page is a no-op
        controller.next_page();
        assert_eq!(controller.page_state().page_index, 4);
        assert_eq!(controller.page_rows().len(), 5);
    }

    #[test]
    fn test_filter_narrowing_resets_page_index() {
        let (mut controller, _rx) = client_table(dataset(45));
        controller.request_page(4);
        assert_eq!(controller.page_state().page_index, 3);

        let start = Instant::now();
        controller.search_input("user-001", start);
        controller.tick(start + SEARCH_DEBOUNCE);

        let state = controller.page_state();
        assert_eq!(state.total_rows, 1);
        assert_eq!(state.page_count, 1);
        assert_eq!(state.page_index, 0);
    }

    #[test]
    fn test_search_only_consults_named_fields() {
        let (tx, _rx) = unbounded_channel();
        let mut controller = TableController::new(
            TableOptions::new("users").search_fields(["name"]),
            SharedTableStore::new(),
            tx,
        )
        .unwrap();
        controller.set_data(dataset(10));

        let start = Instant::now();
        controller.search_input("admin", start);
        controller.tick(start + SEARCH_DEBOUNCE);
        // "admin" only appears in the role field
        assert_eq!(controller.page_state().total_rows, 0);
    }

    #[test]
    fn test_server_next_page_delegates_without_local_change() {
        let rows = dataset(10);
        let (mut controller, mut rx) = server_table(rows.clone(), QueryDescriptor::new(2, 10, 7));
        let before = controller.filtered_rows();

        controller.next_page();
        assert_eq!(rx.try_recv(), Ok(TableEvent::PageChangeRequested { page: 3 }));
        assert!(rx.try_recv().is_err(), "exactly one event expected");

        // Local view did not move; the descriptor owner must answer first
        assert_eq!(controller.page_state().page_index, 1);
        assert!(Arc::ptr_eq(&before, &controller.filtered_rows()));
    }

    #[test]
    fn test_server_request_page_clamps_before_emitting() {
        let (mut controller, mut rx) = server_table(dataset(10), QueryDescriptor::new(2, 10, 7));
        controller.request_page(99);
        assert_eq!(rx.try_recv(), Ok(TableEvent::PageChangeRequested { page: 7 }));
        controller.request_page(0);
        assert_eq!(rx.try_recv(), Ok(TableEvent::PageChangeRequested { page: 1 }));
    }

    #[test]
    fn test_server_boundary_navigation_is_noop() {
        let (mut controller, mut rx) = server_table(dataset(10), QueryDescriptor::new(7, 10, 7));
        controller.next_page();
        assert!(rx.try_recv().is_err());

        controller.set_query_descriptor(QueryDescriptor::new(1, 10, 7));
        controller.previous_page();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_server_search_emits_trimmed_query_after_debounce() {
        let (mut controller, mut rx) = server_table(dataset(10), QueryDescriptor::new(1, 10, 7));
        let start = Instant::now();
        controller.search_input("  alice ", start);
        assert!(rx.try_recv().is_err(), "nothing before the quiet window");
        controller.tick(start + SEARCH_DEBOUNCE);
        assert_eq!(
            rx.try_recv(),
            Ok(TableEvent::SearchChanged {
                query: "alice".to_string()
            })
        );
        // No local filtering happened
        assert_eq!(controller.page_state().total_rows, 10);
    }

    #[test]
    fn test_server_descriptor_last_write_wins() {
        let (mut controller, _rx) = server_table(dataset(10), QueryDescriptor::new(1, 10, 7));
        controller.set_query_descriptor(QueryDescriptor::new(5, 10, 7));
        controller.set_query_descriptor(QueryDescriptor::new(3, 10, 7));
        assert_eq!(controller.page_state().page_index, 2);
    }

    #[test]
    fn test_reserved_table_name_is_rejected_without_store_writes() {
        let store = SharedTableStore::new();
        let (tx, _rx) = unbounded_channel();
        let result = TableController::new(
            TableOptions::new("default"),
            store.clone(),
            tx.clone(),
        );
        assert_eq!(
            result.err(),
            Some(TableError::InvalidTableName("default".to_string()))
        );

        // A second instance misconfigured the same way fails identically
        let result = TableController::new(TableOptions::new("default"), store.clone(), tx);
        assert!(result.is_err());

        // Neither wrote into the shared store
        assert!(store.table_names().is_empty());
    }

    #[test]
    fn test_select_all_is_page_scoped() {
        let (mut controller, mut rx) = client_table(dataset(20));
        controller.toggle_all_page_rows(true);

        let selected = controller.selected_rows();
        assert_eq!(selected.len(), 10);
        let page_ids: Vec<RowId> = controller.page_rows().into_iter().map(|r| r.id).collect();
        for row in &selected {
            assert!(page_ids.contains(&row.id));
        }

        // The selection-changed notification fired synchronously
        assert!(matches!(
            rx.try_recv(),
            Ok(TableEvent::RowSelectionChanged { rows }) if rows.len() == 10
        ));
    }

    #[test]
    fn test_selection_persists_across_page_changes() {
        let (mut controller, _rx) = client_table(dataset(20));
        let first = controller.page_rows()[0].id.clone();
        controller.toggle_row_selection(&first);

        controller.next_page();
        assert!(controller.is_row_selected(&first));
        assert_eq!(controller.selected_rows().len(), 1);
    }

    #[test]
    fn test_selection_written_through_to_store() {
        let store = SharedTableStore::new();
        let (tx, _rx) = unbounded_channel();
        let mut controller =
            TableController::new(TableOptions::new("users"), store.clone(), tx).unwrap();
        controller.set_data(dataset(5));
        let id = controller.page_rows()[0].id.clone();
        controller.toggle_row_selection(&id);

        let state = store.state("users").unwrap();
        assert_eq!(state.selected_rows.len(), 1);
        assert_eq!(state.selected_rows[0].id, id);
    }

    #[test]
    fn test_sort_toggle_orders_page_rows() {
        let (mut controller, _rx) = client_table(Arc::new(vec![
            person(1, "carol", "admin"),
            person(2, "alice", "viewer"),
            person(3, "bob", "admin"),
        ]));

        controller.toggle_sort("name");
        let names: Vec<String> = controller
            .page_rows()
            .iter()
            .map(|r| r.display_value("name"))
            .collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);

        controller.toggle_sort("name");
        let names: Vec<String> = controller
            .page_rows()
            .iter()
            .map(|r| r.display_value("name"))
            .collect();
        assert_eq!(names, vec!["carol", "bob", "alice"]);
    }

    #[test]
    fn test_server_sort_is_display_only() {
        let mut query = QueryDescriptor::new(1, 10, 1);
        query.sort_by = Some("name".to_string());
        query.sort_order = crate::core::types::SortOrder::Descending;
        let (mut controller, _rx) = server_table(dataset(3), query);

        // Local toggles are ignored; the descriptor's sort is what binds
        controller.toggle_sort("role");
        let sort = controller.sort_state().unwrap();
        assert_eq!(sort.field, "name");
        assert_eq!(sort.order, crate::core::types::SortOrder::Descending);
    }

    #[test]
    fn test_column_visibility_written_through() {
        let store = SharedTableStore::new();
        let (tx, _rx) = unbounded_channel();
        let mut controller =
            TableController::new(TableOptions::new("users"), store.clone(), tx).unwrap();
        controller.set_data(dataset(3));

        assert_eq!(controller.visible_columns(), vec!["name", "role"]);
        controller.toggle_column("role");
        assert_eq!(controller.visible_columns(), vec!["name"]);
        assert_eq!(store.state("users").unwrap().selected_cols, vec!["name"]);

        controller.toggle_column("role");
        assert!(controller.is_column_visible("role"));
    }

    #[test]
    fn test_identical_data_reference_is_skipped() {
        let rows = dataset(10);
        let (mut controller, _rx) = client_table(rows.clone());
        controller.request_page(2);
        // Same allocation: the page reset that a data change would cause is skipped
        controller.set_data(rows);
        assert_eq!(controller.page_state().page_index, 1);
    }

    #[test]
    fn test_reset_restores_defaults_and_notifies() {
        let (mut controller, mut rx) = client_table(dataset(20));
        let start = Instant::now();
        controller.search_input("user-00", start);
        controller.tick(start + SEARCH_DEBOUNCE);
        controller.toggle_sort("name");
        controller.toggle_all_page_rows(true);
        while rx.try_recv().is_ok() {}

        controller.reset();
        assert_eq!(controller.applied_search(), "");
        assert!(controller.sort_state().is_none());
        assert_eq!(controller.page_state().total_rows, 20);
        assert!(controller.selected_rows().is_empty());
        assert!(matches!(
            rx.try_recv(),
            Ok(TableEvent::RowSelectionChanged { rows }) if rows.is_empty()
        ));
    }

    #[test]
    fn test_row_events() {
        let (controller, mut rx) = client_table(dataset(2));
        let row = controller.page_rows()[0].clone();
        controller.row_clicked(&row);
        controller.row_action("delete", &row);

        assert_eq!(rx.try_recv(), Ok(TableEvent::RowClicked { row: row.clone() }));
        assert_eq!(
            rx.try_recv(),
            Ok(TableEvent::RowAction {
                action_id: "delete".to_string(),
                row
            })
        );
    }
}
