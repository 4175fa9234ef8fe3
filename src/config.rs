use std::{env, path::PathBuf, time::Duration};

use derive_deref::{Deref, DerefMut};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::controller::{TableOptions, DEFAULT_PAGE_SIZE, PAGE_SIZE_PRESETS};
use crate::tui::{KeyBinding, KeyBindings, Theme};

const CONFIG: &str = include_str!("../.config/config.json5");

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

/// Table defaults configurable from file
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TableDefaults {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub debounce_ms: u64,
    pub theme: String,
}

impl Default for TableDefaults {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_PRESETS.to_vec(),
            debounce_ms: 500,
            theme: "dark".to_string(),
        }
    }
}

/// Extra keybindings overlaid on the built-in defaults
#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize)]
pub struct BindingOverrides(Vec<KeyBinding>);

/// Application configuration: embedded defaults merged with a user file
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub table: TableDefaults,
    #[serde(default)]
    pub keybindings: BindingOverrides,
}

impl Config {
    /// Load the embedded defaults, overlaid with the user config file.
    ///
    /// The user file is looked up at `config_path` when given, else at
    /// `$TABLEKIT_CONFIG/config.json5`, else in the platform config
    /// directory. A missing user file is fine; the embedded defaults stand.
    pub fn from_path(config_path: Option<&PathBuf>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            CONFIG,
            config::FileFormat::Json5,
        ));

        let user_path = config_path.cloned().or_else(default_config_path);
        if let Some(path) = user_path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Json5)
                    .required(false),
            );
        }

        builder.build()?.try_deserialize()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.table.debounce_ms)
    }

    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.table.theme)
    }

    /// Built-in keybindings with the configured overrides applied
    pub fn keybindings(&self) -> KeyBindings {
        KeyBindings::default().merged_with(&self.keybindings)
    }

    /// Table options seeded from the configured defaults
    pub fn table_options(&self, table_name: &str) -> TableOptions {
        let mut options = TableOptions::new(table_name)
            .page_size(self.table.page_size)
            .debounce(self.debounce());
        options.page_size_options = self.table.page_size_options.clone();
        options
    }
}

fn default_config_path() -> Option<PathBuf> {
    if let Some(folder) = CONFIG_FOLDER.clone() {
        return Some(folder.join("config.json5"));
    }
    ProjectDirs::from("com", "tablekit", "tablekit")
        .map(|dirs| dirs.config_local_dir().join("config.json5"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::Action;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: Config = json5::from_str(CONFIG).unwrap();
        assert_eq!(config.table.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.table.page_size_options, PAGE_SIZE_PRESETS.to_vec());
        assert_eq!(config.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_embedded_bindings_overlay() {
        let config: Config = json5::from_str(CONFIG).unwrap();
        let bindings = config.keybindings();
        // The embedded config adds row actions on top of the defaults
        assert_eq!(
            bindings.get_action(&KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)),
            Some(&Action::RowAction("delete".to_string()))
        );
        // Built-ins survive the overlay
        assert_eq!(
            bindings.get_action(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(&Action::Quit)
        );
    }

    #[test]
    fn test_table_options_seeded_from_config() {
        let config = Config::default();
        let options = config.table_options("users");
        assert_eq!(options.table_name, "users");
        assert_eq!(options.page_size, DEFAULT_PAGE_SIZE);
        assert!(options.query.is_none());
    }
}
