//! Host application state.
//!
//! Wires one table instance to the shared store, routes key events either
//! into the search box or through the keybindings into table actions, and
//! drains the controller's outbound events into a status line. The demo
//! binary owns the terminal; this type owns everything inside it.

use color_eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::info;

use crate::controller::{TableEvent, TableOptions};
use crate::core::store::SharedTableStore;
use crate::core::types::Row;
use crate::tui::components::{SearchInput, SearchInputChange, TableView};
use crate::tui::{Action, Component, Focusable, KeyBindings, Theme};

/// Application state for the demo host
pub struct App {
    store: SharedTableStore,
    table: TableView,
    search: SearchInput,
    keybindings: KeyBindings,
    theme: Theme,
    events: UnboundedReceiver<TableEvent>,
    status: String,
    should_quit: bool,
}

impl App {
    pub fn new(options: TableOptions, keybindings: KeyBindings, theme: Theme) -> Self {
        let store = SharedTableStore::new();
        let (tx, rx) = unbounded_channel();
        let mut table = TableView::new(options, store.clone(), tx, theme.clone());
        table.set_focused(true);

        Self {
            store,
            table,
            search: SearchInput::new("Type / to search..."),
            keybindings,
            theme,
            events: rx,
            status: String::new(),
            should_quit: false,
        }
    }

    pub fn store(&self) -> &SharedTableStore {
        &self.store
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    /// Supply the dataset to display
    pub fn set_data(&mut self, rows: Arc<Vec<Row>>) {
        self.table.set_data(rows);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route a key event: search box first when focused, then keybindings
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.search.is_focused() {
            match self.search.handle_key(&key) {
                SearchInputChange::Edited(value) => {
                    self.table.search_input(&value, Instant::now());
                    return Ok(());
                }
                SearchInputChange::Consumed => return Ok(()),
                SearchInputChange::Ignored => {}
            }
            // Enter or Esc hands focus back to the table
            if let Some(action) = self.keybindings.get_action(&key)
                && matches!(action, Action::Cancel | Action::Activate)
            {
                self.search.set_focused(false);
                self.table.set_focused(true);
            }
            return Ok(());
        }

        let Some(action) = self.keybindings.get_action(&key) else {
            return Ok(());
        };
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusSearch => {
                self.search.set_focused(true);
                self.table.set_focused(false);
            }
            Action::Cancel => {
                // Esc with the table focused drops the current query
                if let SearchInputChange::Edited(value) = self.search.clear() {
                    self.table.search_input(&value, Instant::now());
                }
            }
            other => {
                self.table.handle_action(other)?;
            }
        }
        Ok(())
    }

    /// Advance timers and drain controller events into the status line
    pub fn tick(&mut self) -> Result<()> {
        self.table.tick(Instant::now())?;
        while let Ok(event) = self.events.try_recv() {
            self.status = Self::describe(&event);
            info!("table event: {}", self.status);
        }
        Ok(())
    }

    fn describe(event: &TableEvent) -> String {
        match event {
            TableEvent::PageChangeRequested { page } => {
                format!("page {page} requested from the data source")
            }
            TableEvent::PageSizeChangeRequested { size } => {
                format!("page size {size} requested from the data source")
            }
            TableEvent::SearchChanged { query } => format!("search changed to {query:?}"),
            TableEvent::RowSelectionChanged { rows } => {
                format!("{} row(s) selected", rows.len())
            }
            TableEvent::RowClicked { row } => format!("row {} activated", row.id),
            TableEvent::RowAction { action_id, row } => {
                format!("action {action_id:?} on row {}", row.id)
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let [search_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.search.render(frame, search_area, &self.theme);
        self.table.render(frame, table_area);
        frame.render_widget(
            Paragraph::new(self.status.clone()).style(self.theme.muted_style()),
            status_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldMap;
    use crate::services::debounce::SEARCH_DEBOUNCE;
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn rows(count: usize) -> Arc<Vec<Row>> {
        Arc::new(
            (0..count)
                .map(|i| {
                    let mut fields = FieldMap::new();
                    fields.insert("name".to_string(), json!(format!("user-{i:02}")));
                    Row::new(i, fields)
                })
                .collect(),
        )
    }

    fn app(count: usize) -> App {
        let mut app = App::new(
            TableOptions::new("users"),
            KeyBindings::default(),
            Theme::default(),
        );
        app.set_data(rows(count));
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    #[test]
    fn test_quit_key() {
        let mut app = app(3);
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_search_focus_routing() {
        let mut app = app(30);
        press(&mut app, KeyCode::Char('/'));
        // 'q' now types into the search box instead of quitting
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert_eq!(app.search.value(), "q");

        press(&mut app, KeyCode::Esc);
        assert!(!app.search.is_focused());
    }

    #[test]
    fn test_typed_search_applies_after_tick() {
        let mut app = app(30);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('u'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Esc);

        // The quiet window has not elapsed inside this test's timeframe,
        // so force the debouncer forward through the controller directly.
        let controller = app.table.controller_mut().unwrap();
        controller.tick(Instant::now() + SEARCH_DEBOUNCE);
        assert_eq!(controller.applied_search(), "us");
    }

    #[test]
    fn test_render_smoke() {
        let mut app = app(12);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("users"));
        assert!(content.contains("user-00"));
    }
}
