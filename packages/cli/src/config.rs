use folio_document::Document;
use folio_editor::views::ViewMode;
use folio_editor::{LocalUser, SessionOptions};
use folio_render::{HtmlOptions, Theme};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Display name of the local user (generated when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_color: Option<String>,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub default_view: ViewMode,

    /// Undo depth (0 = unlimited)
    #[serde(default = "default_history_levels")]
    pub history_levels: usize,

    #[serde(default = "default_true")]
    pub pretty_html: bool,

    /// Seed the roster, table and kanban with sample data
    #[serde(default = "default_true")]
    pub demo_data: bool,
}

fn default_history_levels() -> usize {
    100
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = Self::path(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn path(cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME)
    }

    /// Configured identity, filling whatever is missing from a generated one
    pub fn local_user(&self) -> LocalUser {
        let generated = LocalUser::generate();
        LocalUser::new(
            self.username.clone().unwrap_or(generated.username),
            self.user_color.clone().unwrap_or(generated.color),
        )
    }

    pub fn session_options(&self, document: Document) -> SessionOptions {
        SessionOptions {
            id: "cli".to_string(),
            user: self.local_user(),
            document,
            history_levels: self.history_levels,
            view_mode: self.default_view,
            demo_data: self.demo_data,
        }
    }

    pub fn html_options(&self) -> HtmlOptions {
        if self.pretty_html {
            HtmlOptions::default()
        } else {
            HtmlOptions::compact()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            user_color: None,
            theme: Theme::default(),
            default_view: ViewMode::default(),
            history_levels: default_history_levels(),
            pretty_html: true,
            demo_data: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "username": "Quick Writer",
            "userColor": "#6B5B95",
            "theme": "dark",
            "defaultView": "kanban",
            "historyLevels": 20,
            "prettyHtml": false,
            "demoData": false
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.default_view, ViewMode::Kanban);
        assert_eq!(config.history_levels, 20);
        assert!(!config.demo_data);
        assert_eq!(config.html_options(), HtmlOptions::compact());
        assert_eq!(
            config.local_user(),
            LocalUser::new("Quick Writer", "#6B5B95")
        );
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history_levels, 100);
        assert!(config.pretty_html);
        assert!(config.demo_data);
        assert_eq!(config.default_view, ViewMode::Document);
    }

    #[test]
    fn test_partial_identity() {
        let config = Config {
            username: Some("Solo".to_string()),
            ..Config::default()
        };
        let user = config.local_user();
        assert_eq!(user.username, "Solo");
        assert!(user.color.starts_with('#'));
    }

    #[test]
    fn test_written_config_omits_identity() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("username"));
        assert!(json.contains("\"historyLevels\":100"));
        assert!(json.contains("\"defaultView\":\"document\""));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = std::env::temp_dir().join("folio-config-missing");
        let config = Config::load(&dir.display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }
}
