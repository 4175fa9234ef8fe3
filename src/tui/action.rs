use serde::{Deserialize, Serialize};
use strum::Display;

/// All actions the table UI can dispatch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Cursor
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Pagination
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    CyclePageSize,

    // Data operations
    ToggleSort,
    FocusSearch,
    Reset,

    // Selection
    ToggleSelect,
    ToggleSelectAll,
    ClearSelection,

    // Columns
    HideColumn,
    ShowAllColumns,

    // Row interaction
    Activate,
    /// Dispatch a configured row action (by id) on the cursor row
    RowAction(String),

    // Application
    Cancel,
    Quit,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> String {
        match self {
            Action::MoveUp => "Move cursor up".to_string(),
            Action::MoveDown => "Move cursor down".to_string(),
            Action::MoveLeft => "Move cursor left".to_string(),
            Action::MoveRight => "Move cursor right".to_string(),
            Action::NextPage => "Next page".to_string(),
            Action::PreviousPage => "Previous page".to_string(),
            Action::FirstPage => "Go to first page".to_string(),
            Action::LastPage => "Go to last page".to_string(),
            Action::CyclePageSize => "Cycle rows per page".to_string(),
            Action::ToggleSort => "Toggle sort on current column".to_string(),
            Action::FocusSearch => "Focus the search box".to_string(),
            Action::Reset => "Reset filter, sort and selection".to_string(),
            Action::ToggleSelect => "Toggle row selection".to_string(),
            Action::ToggleSelectAll => "Toggle selection of all page rows".to_string(),
            Action::ClearSelection => "Clear selection".to_string(),
            Action::HideColumn => "Hide current column".to_string(),
            Action::ShowAllColumns => "Show all columns".to_string(),
            Action::Activate => "Activate current row".to_string(),
            Action::RowAction(id) => format!("Row action: {id}"),
            Action::Cancel => "Cancel / unfocus".to_string(),
            Action::Quit => "Quit".to_string(),
        }
    }
}
