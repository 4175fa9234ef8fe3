//! Single-line search box.
//!
//! Edits a local buffer on raw key events (character, backspace, delete,
//! cursor movement) and reports every change so the host can feed the
//! table's debouncer; the component itself knows nothing about settle
//! windows.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::Theme;

/// What a key event did to the input buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInputChange {
    /// The text changed; the new value should be fed to the debouncer
    Edited(String),
    /// The key was consumed without changing the text
    Consumed,
    /// Not an editing key; let the host handle it
    Ignored,
}

/// Single-line text input for the table search query
#[derive(Debug, Default)]
pub struct SearchInput {
    value: String,
    cursor: usize,
    focused: bool,
    placeholder: String,
}

impl SearchInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Clear the buffer, reporting the change if there was any text
    pub fn clear(&mut self) -> SearchInputChange {
        if self.value.is_empty() {
            return SearchInputChange::Consumed;
        }
        self.value.clear();
        self.cursor = 0;
        SearchInputChange::Edited(String::new())
    }

    /// Apply a key event to the buffer
    pub fn handle_key(&mut self, key: &KeyEvent) -> SearchInputChange {
        if !self.focused {
            return SearchInputChange::Ignored;
        }
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.value.insert(self.byte_cursor(), c);
                self.cursor += 1;
                SearchInputChange::Edited(self.value.clone())
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.byte_cursor());
                    SearchInputChange::Edited(self.value.clone())
                } else {
                    SearchInputChange::Consumed
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    self.value.remove(self.byte_cursor());
                    SearchInputChange::Edited(self.value.clone())
                } else {
                    SearchInputChange::Consumed
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                SearchInputChange::Consumed
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                SearchInputChange::Consumed
            }
            KeyCode::Home => {
                self.cursor = 0;
                SearchInputChange::Consumed
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                SearchInputChange::Consumed
            }
            _ => SearchInputChange::Ignored,
        }
    }

    // Cursor is tracked in chars; translate to a byte offset for editing
    fn byte_cursor(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(if self.focused {
                theme.focused_border_style()
            } else {
                theme.border_style()
            });

        let line = if self.value.is_empty() && !self.focused {
            Line::styled(self.placeholder.clone(), theme.muted_style())
        } else {
            Line::from(Span::raw(self.value.clone()))
        };
        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused {
            frame.set_cursor_position((
                area.x + 1 + self.cursor as u16,
                area.y + 1,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(input: &mut SearchInput, code: KeyCode) -> SearchInputChange {
        input.handle_key(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_edits_and_reports() {
        let mut input = SearchInput::new("Search...");
        input.set_focused(true);
        assert_eq!(
            press(&mut input, KeyCode::Char('a')),
            SearchInputChange::Edited("a".to_string())
        );
        assert_eq!(
            press(&mut input, KeyCode::Char('b')),
            SearchInputChange::Edited("ab".to_string())
        );
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_backspace_at_start_consumes_without_change() {
        let mut input = SearchInput::new("");
        input.set_focused(true);
        assert_eq!(press(&mut input, KeyCode::Backspace), SearchInputChange::Consumed);
    }

    #[test]
    fn test_edit_in_middle() {
        let mut input = SearchInput::new("");
        input.set_focused(true);
        press(&mut input, KeyCode::Char('a'));
        press(&mut input, KeyCode::Char('c'));
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Char('b'));
        assert_eq!(input.value(), "abc");
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "ac");
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut input = SearchInput::new("");
        assert_eq!(
            press(&mut input, KeyCode::Char('a')),
            SearchInputChange::Ignored
        );
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_clear() {
        let mut input = SearchInput::new("");
        input.set_focused(true);
        press(&mut input, KeyCode::Char('x'));
        assert_eq!(input.clear(), SearchInputChange::Edited(String::new()));
        assert_eq!(input.clear(), SearchInputChange::Consumed);
    }
}
