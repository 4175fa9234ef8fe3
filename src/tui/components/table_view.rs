//! TableView: binds a `TableController`'s derived state to a ratatui table.
//!
//! This is the consumer side of the engine: sort indicator, selection
//! column, zebra rows, empty state, pagination footer, and the in-place
//! configuration-error state. All table semantics live in the controller;
//! this component only translates actions and draws.

use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table},
    Frame,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use crate::controller::{TableController, TableEvent, TableOptions};
use crate::core::error::TableError;
use crate::core::query::QueryDescriptor;
use crate::core::store::SharedTableStore;
use crate::core::types::{Row, SortOrder};
use crate::tui::{Action, Component, Focusable, Theme};

const DEFAULT_EMPTY_MESSAGE: &str = "No results found.";

/// Interactive table component bound to one controller instance
pub struct TableView {
    controller: Option<TableController>,
    config_error: Option<TableError>,
    cursor_row: usize,
    cursor_col: usize,
    theme: Theme,
    focused: bool,
    empty_message: String,
}

impl TableView {
    /// Create the view, constructing the controller behind it.
    ///
    /// A configuration error (invalid table name) does not fail
    /// construction: it is logged once and the view renders the error state
    /// in place of a table, leaving the shared store untouched.
    pub fn new(
        options: TableOptions,
        store: SharedTableStore,
        events: UnboundedSender<TableEvent>,
        theme: Theme,
    ) -> Self {
        let (controller, config_error) = match TableController::new(options, store, events) {
            Ok(controller) => (Some(controller), None),
            Err(err) => {
                error!("table configuration rejected: {err}");
                (None, Some(err))
            }
        };
        Self {
            controller,
            config_error,
            cursor_row: 0,
            cursor_col: 0,
            theme,
            focused: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn controller(&self) -> Option<&TableController> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut TableController> {
        self.controller.as_mut()
    }

    pub fn config_error(&self) -> Option<&TableError> {
        self.config_error.as_ref()
    }

    /// Supply the current dataset (ignored while in the error state)
    pub fn set_data(&mut self, rows: Arc<Vec<Row>>) {
        if let Some(controller) = &mut self.controller {
            controller.set_data(rows);
            self.clamp_cursor();
        }
    }

    /// Forward a fresh descriptor from the external data-source owner
    pub fn set_query_descriptor(&mut self, query: QueryDescriptor) {
        if let Some(controller) = &mut self.controller {
            controller.set_query_descriptor(query);
            self.clamp_cursor();
        }
    }

    /// Feed a keystroke of search input through to the debouncer
    pub fn search_input(&mut self, text: &str, now: Instant) {
        if let Some(controller) = &mut self.controller {
            controller.search_input(text, now);
        }
    }

    fn clamp_cursor(&mut self) {
        let Some(controller) = &self.controller else {
            return;
        };
        let rows = controller.page_rows().len();
        let cols = controller.visible_columns().len();
        self.cursor_row = self.cursor_row.min(rows.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(cols.saturating_sub(1));
    }

    fn cursor_row_entry(&self) -> Option<Row> {
        self.controller
            .as_ref()
            .and_then(|c| c.page_rows().get(self.cursor_row).cloned())
    }

    fn cursor_column(&self) -> Option<String> {
        self.controller
            .as_ref()
            .and_then(|c| c.visible_columns().get(self.cursor_col).cloned())
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, err: &TableError) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Configuration error")
            .border_style(self.theme.error_style());
        let text = vec![
            Line::from(err.to_string()),
            Line::from(""),
            Line::styled(
                "Fix the table configuration; this instance will not touch shared state.",
                self.theme.muted_style(),
            ),
        ];
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn sort_indicator(&self, column: &str) -> &'static str {
        let Some(controller) = &self.controller else {
            return "";
        };
        match controller.sort_state() {
            Some(sort) if sort.field == column => match sort.order {
                SortOrder::Ascending => " ^",
                SortOrder::Descending => " v",
                SortOrder::None => "",
            },
            _ => "",
        }
    }

    fn footer_lines(&self, controller: &TableController) -> Vec<Line<'static>> {
        let state = controller.page_state();
        let shown = controller.page_rows().len();
        let first_line = if state.total_rows == 0 {
            format!("Showing 0 entries · {} rows/page", state.page_size)
        } else {
            let start = state.page_index * state.page_size;
            format!(
                "Showing {} to {} of {} entries · Page {} of {} · {} rows/page",
                start + 1,
                start + shown,
                state.total_rows,
                state.page_index + 1,
                state.page_count.max(1),
                state.page_size,
            )
        };

        let mut second = Vec::new();
        if !controller.selected_rows().is_empty() {
            second.push(controller.selection_summary());
        }
        if !controller.applied_search().is_empty() {
            second.push(format!("search: {:?}", controller.applied_search()));
        }
        if controller.is_server_driven() {
            second.push("server-driven".to_string());
        }

        vec![
            Line::styled(first_line, self.theme.muted_style()),
            Line::styled(second.join(" · "), self.theme.muted_style()),
        ]
    }
}

impl Component for TableView {
    fn handle_action(&mut self, action: &Action) -> Result<bool> {
        let Some(controller) = &mut self.controller else {
            // The error state consumes nothing; only Quit/Cancel apply upstream
            return Ok(false);
        };

        match action {
            Action::MoveUp => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
            }
            Action::MoveDown => {
                self.cursor_row += 1;
                self.clamp_cursor();
            }
            Action::MoveLeft => {
                self.cursor_col = self.cursor_col.saturating_sub(1);
            }
            Action::MoveRight => {
                self.cursor_col += 1;
                self.clamp_cursor();
            }
            Action::NextPage => {
                controller.next_page();
                self.cursor_row = 0;
            }
            Action::PreviousPage => {
                controller.previous_page();
                self.cursor_row = 0;
            }
            Action::FirstPage => {
                controller.request_page(1);
                self.cursor_row = 0;
            }
            Action::LastPage => {
                let last = controller.page_state().page_count;
                controller.request_page(last as i64);
                self.cursor_row = 0;
            }
            Action::CyclePageSize => {
                let options = controller.page_size_options().to_vec();
                if !options.is_empty() {
                    let current = controller.page_state().page_size;
                    let position = options.iter().position(|&size| size == current);
                    let next = match position {
                        Some(i) => options[(i + 1) % options.len()],
                        None => options[0],
                    };
                    controller.set_page_size(next);
                    self.clamp_cursor();
                }
            }
            Action::ToggleSort => {
                if let Some(column) = self.cursor_column() {
                    if let Some(controller) = &mut self.controller {
                        controller.toggle_sort(&column);
                    }
                }
            }
            Action::ToggleSelect => {
                if let Some(row) = self.cursor_row_entry() {
                    if let Some(controller) = &mut self.controller {
                        controller.toggle_row_selection(&row.id);
                    }
                }
            }
            Action::ToggleSelectAll => {
                let page_rows = controller.page_rows();
                let all_selected = !page_rows.is_empty()
                    && page_rows.iter().all(|row| controller.is_row_selected(&row.id));
                controller.toggle_all_page_rows(!all_selected);
            }
            Action::ClearSelection => {
                controller.clear_selection();
            }
            Action::HideColumn => {
                if let Some(column) = self.cursor_column() {
                    if let Some(controller) = &mut self.controller {
                        controller.toggle_column(&column);
                    }
                    self.clamp_cursor();
                }
            }
            Action::ShowAllColumns => {
                controller.show_all_columns();
            }
            Action::Activate => {
                if let Some(row) = self.cursor_row_entry() {
                    if let Some(controller) = &self.controller {
                        controller.row_clicked(&row);
                    }
                }
            }
            Action::RowAction(action_id) => {
                if let Some(row) = self.cursor_row_entry() {
                    if let Some(controller) = &self.controller {
                        controller.row_action(action_id, &row);
                    }
                }
            }
            Action::Reset => {
                controller.reset();
                self.cursor_row = 0;
                self.cursor_col = 0;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(err) = &self.config_error {
            self.render_error(frame, area, err);
            return;
        }
        let Some(controller) = &self.controller else {
            return;
        };

        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).areas(area);

        let columns = controller.visible_columns();
        let page_rows = controller.page_rows();
        let state = controller.page_state();

        // Header: select-all indicator plus column names with sort marker
        let all_selected =
            !page_rows.is_empty() && page_rows.iter().all(|row| controller.is_row_selected(&row.id));
        let some_selected = page_rows.iter().any(|row| controller.is_row_selected(&row.id));
        let select_header = if all_selected {
            "[x]"
        } else if some_selected {
            "[~]"
        } else {
            "[ ]"
        };
        let mut header_cells = vec![Cell::from(select_header)];
        header_cells.extend(columns.iter().map(|name| {
            Cell::from(format!("{name}{}", self.sort_indicator(name)))
        }));
        let header = TableRow::new(header_cells).style(self.theme.header_style());

        let rows: Vec<TableRow> = if page_rows.is_empty() {
            vec![TableRow::new(vec![
                Cell::from(""),
                Cell::from(self.empty_message.clone()).style(self.theme.muted_style()),
            ])]
        } else {
            page_rows
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    let marker = if controller.is_row_selected(&row.id) {
                        Cell::from("[x]").style(self.theme.selected_marker_style())
                    } else {
                        Cell::from("[ ]")
                    };
                    let mut cells = vec![marker];
                    cells.extend(
                        columns
                            .iter()
                            .map(|name| Cell::from(row.display_value(name))),
                    );
                    let style = if index == self.cursor_row {
                        self.theme.cursor_style()
                    } else if index % 2 == 1 {
                        self.theme.alt_row_style()
                    } else {
                        self.theme.normal_style()
                    };
                    TableRow::new(cells).style(style)
                })
                .collect()
        };

        let column_count = columns.len().max(1);
        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(vec![
            Constraint::Percentage((100 / column_count) as u16);
            column_count
        ]);

        let title = format!(
            "{} [{} rows]",
            controller.table_name(),
            state.total_rows
        );
        let table = Table::new(rows, constraints).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(if self.focused {
                    self.theme.focused_border_style()
                } else {
                    self.theme.border_style()
                }),
        );
        frame.render_widget(table, table_area);

        let footer = Paragraph::new(self.footer_lines(controller));
        frame.render_widget(footer, footer_area);
    }

    fn name(&self) -> &str {
        "TableView"
    }

    fn tick(&mut self, now: Instant) -> Result<()> {
        if let Some(controller) = &mut self.controller {
            controller.tick(now);
            self.clamp_cursor();
        }
        Ok(())
    }
}

impl Focusable for TableView {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
