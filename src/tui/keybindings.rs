use crate::tui::action::Action;
use color_eyre::{eyre::eyre, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Single keybinding entry, as it appears in config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

/// Pattern a key event is matched against
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPattern {
    /// Parse from a string like "Ctrl+f", "Shift+Tab", "PageDown", "a"
    pub fn parse(input: &str) -> Result<Self> {
        let mut modifiers = KeyModifiers::empty();
        let mut code = None;

        for part in input.split('+') {
            match part {
                "Ctrl" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "Alt" | "alt" => modifiers |= KeyModifiers::ALT,
                "Shift" | "shift" => modifiers |= KeyModifiers::SHIFT,
                key => code = Some(Self::parse_code(key)?),
            }
        }

        let code = code.ok_or_else(|| eyre!("Key pattern '{input}' names no key"))?;
        Ok(Self { code, modifiers })
    }

    fn parse_code(key: &str) -> Result<KeyCode> {
        let code = match key {
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Enter" => KeyCode::Enter,
            "Esc" => KeyCode::Esc,
            "Tab" => KeyCode::Tab,
            "Backspace" => KeyCode::Backspace,
            "Delete" => KeyCode::Delete,
            "Space" => KeyCode::Char(' '),
            single if single.chars().count() == 1 => {
                KeyCode::Char(single.chars().next().ok_or_else(|| eyre!("empty key"))?)
            }
            other => return Err(eyre!("Unknown key name '{other}'")),
        };
        Ok(code)
    }

    /// Normalize an incoming event for lookup.
    ///
    /// Terminals report shifted characters as the character itself plus the
    /// SHIFT modifier; the character already carries the shift, so it is
    /// stripped to make "G" and "?" bindings match.
    pub fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers -= KeyModifiers::SHIFT;
        }
        Self {
            code: event.code,
            modifiers,
        }
    }
}

/// Maps key events to actions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<KeyBinding>,
    map: HashMap<KeyPattern, Action>,
}

impl KeyBindings {
    /// Build from a binding list; later entries win over earlier ones
    pub fn from_bindings(bindings: Vec<KeyBinding>) -> Self {
        let map = bindings
            .iter()
            .filter_map(|binding| {
                KeyPattern::parse(&binding.key)
                    .ok()
                    .map(|pattern| (pattern, binding.action.clone()))
            })
            .collect();
        Self { bindings, map }
    }

    /// Overlay extra bindings (from a config file) on top of these
    pub fn merged_with(&self, extra: &[KeyBinding]) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.extend_from_slice(extra);
        Self::from_bindings(bindings)
    }

    /// Resolve a key event to an action
    pub fn get_action(&self, key: &KeyEvent) -> Option<&Action> {
        self.map.get(&KeyPattern::from_event(key))
    }

    /// Keys bound to an action, for help display
    pub fn keys_for_action(&self, action: &Action) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|binding| &binding.action == action)
            .map(|binding| binding.key.clone())
            .collect()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_bindings(vec![
            // Cursor - arrows and vim-style
            KeyBinding::new("Up", Action::MoveUp),
            KeyBinding::new("Down", Action::MoveDown),
            KeyBinding::new("Left", Action::MoveLeft),
            KeyBinding::new("Right", Action::MoveRight),
            KeyBinding::new("k", Action::MoveUp),
            KeyBinding::new("j", Action::MoveDown),
            KeyBinding::new("h", Action::MoveLeft),
            KeyBinding::new("l", Action::MoveRight),
            // Pagination
            KeyBinding::new("PageDown", Action::NextPage),
            KeyBinding::new("PageUp", Action::PreviousPage),
            KeyBinding::new("n", Action::NextPage),
            KeyBinding::new("p", Action::PreviousPage),
            KeyBinding::new("Home", Action::FirstPage),
            KeyBinding::new("End", Action::LastPage),
            KeyBinding::new("z", Action::CyclePageSize),
            // Data operations
            KeyBinding::new("s", Action::ToggleSort),
            KeyBinding::new("/", Action::FocusSearch),
            KeyBinding::new("Ctrl+f", Action::FocusSearch),
            KeyBinding::new("r", Action::Reset),
            // Selection
            KeyBinding::new("Space", Action::ToggleSelect),
            KeyBinding::new("a", Action::ToggleSelectAll),
            KeyBinding::new("c", Action::ClearSelection),
            // Columns
            KeyBinding::new("H", Action::HideColumn),
            KeyBinding::new("U", Action::ShowAllColumns),
            // Row interaction
            KeyBinding::new("Enter", Action::Activate),
            // Application
            KeyBinding::new("Esc", Action::Cancel),
            KeyBinding::new("q", Action::Quit),
        ])
    }
}
