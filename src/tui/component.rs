use crate::tui::action::Action;
use color_eyre::Result;
use ratatui::{layout::Rect, Frame};
use std::time::Instant;

/// Base trait for table UI components.
///
/// Components consume `Action`s rather than raw key events; the host maps
/// keys to actions through `KeyBindings` so bindings stay configurable.
pub trait Component {
    /// Handle an action.
    ///
    /// Returns Ok(true) if the action was consumed, Ok(false) if it should
    /// propagate to another component.
    fn handle_action(&mut self, action: &Action) -> Result<bool>;

    /// Render the component into the given area
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Component name for logging
    fn name(&self) -> &str;

    /// Advance time-driven state (debounce schedules and the like).
    ///
    /// Called from the host's tick; the default does nothing.
    fn tick(&mut self, _now: Instant) -> Result<()> {
        Ok(())
    }
}

/// Components that can receive keyboard focus
pub trait Focusable: Component {
    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);
}
