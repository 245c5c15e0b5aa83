//! Configuration management.
//!
//! Configuration is read from `~/.config/freshet/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. The session reads everything once; there is no reload.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feeds: Vec<FeedConfig>,
    pub preview: Option<PreviewConfig>,
    pub ui: UiConfig,
    pub refresh: RefreshConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// One subscribed feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
}

/// Single-feed preview mode: replaces the subscribed feeds for the session
/// and takes over the title bar name, accent color, and browser behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    pub name: String,
    pub url: String,
    #[serde(
        default = "default_preview_color",
        deserialize_with = "colors::deserialize_color"
    )]
    pub color: Color,
    #[serde(default)]
    pub open_in_browser: bool,
}

fn default_preview_color() -> Color {
    Color::Cyan
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub title: String,
    pub open_in_browser: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "freshet".to_string(),
            open_in_browser: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub interval: String,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: "15m".to_string(),
        }
    }
}

impl RefreshConfig {
    /// The automatic refresh period.
    pub fn period(&self) -> Result<Duration, String> {
        parse_interval(&self.interval).map(Duration::from_secs)
    }
}

/// Parse an interval string like "1h", "30m", "90s", "1d" or raw seconds.
pub fn parse_interval(s: &str) -> Result<u64, String> {
    let s = s.trim().to_lowercase();

    if let Some(hours) = s.strip_suffix('h') {
        hours
            .parse::<u64>()
            .map(|h| h * 3600)
            .map_err(|_| format!("Invalid hours: {}", hours))
    } else if let Some(minutes) = s.strip_suffix('m') {
        minutes
            .parse::<u64>()
            .map(|m| m * 60)
            .map_err(|_| format!("Invalid minutes: {}", minutes))
    } else if let Some(days) = s.strip_suffix('d') {
        days.parse::<u64>()
            .map(|d| d * 86400)
            .map_err(|_| format!("Invalid days: {}", days))
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>()
            .map_err(|_| format!("Invalid seconds: {}", secs))
    } else {
        s.parse::<u64>()
            .map_err(|_| format!("Invalid interval: {}. Use format like '1h', '30m', '90s'", s))
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for feed in &self.feeds {
            url::Url::parse(&feed.url)
                .map_err(|e| ConfigError::Invalid(format!("feed '{}': {}", feed.name, e)))?;
        }
        if let Some(preview) = &self.preview {
            url::Url::parse(&preview.url)
                .map_err(|e| ConfigError::Invalid(format!("preview feed: {}", e)))?;
        }
        self.refresh.period().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Get the default config file path: `~/.config/freshet/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("freshet").join("config.toml"))
    }

    pub fn is_preview_mode(&self) -> bool {
        self.preview.is_some()
    }

    /// Feeds the session fetches from: the preview feed alone when preview
    /// mode is active, otherwise the subscribed list.
    pub fn session_feeds(&self) -> Vec<FeedConfig> {
        match &self.preview {
            Some(preview) => vec![FeedConfig {
                name: preview.name.clone(),
                url: preview.url.clone(),
            }],
            None => self.feeds.clone(),
        }
    }

    pub fn session_title(&self) -> String {
        match &self.preview {
            Some(preview) => preview.name.clone(),
            None => self.ui.title.clone(),
        }
    }

    pub fn session_accent(&self) -> Color {
        match &self.preview {
            Some(preview) => preview.color,
            None => self.colors.accent,
        }
    }

    pub fn session_browser_mode(&self) -> bool {
        match &self.preview {
            Some(preview) => preview.open_in_browser,
            None => self.ui.open_in_browser,
        }
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# freshet configuration
#
# Colors accept named colors (Black, Red, Green, Yellow, Blue, Magenta,
# Cyan, Gray, DarkGray, Light* variants, White, Reset) or hex colors
# ("#RRGGBB" / "#RGB").
#
# Keys accept single characters ("a", "G"), special key names (Enter, Esc,
# Space, Tab, PageUp, PageDown, Up, Down, F1-F12) and modifier prefixes
# ("Ctrl+c", "Shift+Tab", "Alt+Enter").

# Feeds are read top to bottom; entries keep this order in the list.
#
# [[feeds]]
# name = "rust-blog"
# url = "https://blog.rust-lang.org/feed.xml"

# Preview a single feed with its own title bar and accent color. When this
# section is present it replaces the subscribed feeds for the session.
#
# [preview]
# name = "lobsters"
# url = "https://lobste.rs/rss"
# color = "Magenta"
# open_in_browser = false

[ui]
# Title shown in the session title bar
title = "freshet"
# Open selected entries in the browser instead of the inline reader
open_in_browser = false

[refresh]
# Automatic refresh period ("15m", "1h", "90s", or raw seconds)
interval = "15m"

[colors]
accent = "Cyan"
title_fg = "Black"
selection_fg = "White"
muted = "DarkGray"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
refresh = ["r"]
select = ["Enter"]
back = ["Esc", "q"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
page_up = ["PageUp"]
page_down = ["PageDown"]
goto_top = ["g"]
goto_bottom = ["G"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.colors.accent, Color::Cyan);
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
        assert_eq!(config.refresh.interval, "15m");
        assert!(config.feeds.is_empty());
        assert!(!config.is_preview_mode());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[colors]
accent = "#FF0000"

[refresh]
interval = "1h"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.colors.accent, Color::Rgb(255, 0, 0));
        assert_eq!(config.colors.muted, Color::DarkGray);
        assert_eq!(config.refresh.period().unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.ui.title, "freshet");
        assert!(!config.session_browser_mode());
        assert_eq!(config.refresh.period().unwrap(), Duration::from_secs(900));
    }

    #[test]
    fn test_preview_overrides_session_settings() {
        let content = r##"
[[feeds]]
name = "a"
url = "https://a.example/feed"

[preview]
name = "lobsters"
url = "https://lobste.rs/rss"
color = "Magenta"
open_in_browser = true
"##;
        let config: Config = toml::from_str(content).unwrap();

        assert!(config.is_preview_mode());
        assert_eq!(config.session_title(), "lobsters");
        assert_eq!(config.session_accent(), Color::Magenta);
        assert!(config.session_browser_mode());

        let feeds = config.session_feeds();
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].url, "https://lobste.rs/rss");
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("1h").unwrap(), 3600);
        assert_eq!(parse_interval("30m").unwrap(), 1800);
        assert_eq!(parse_interval("90s").unwrap(), 90);
        assert_eq!(parse_interval("1d").unwrap(), 86400);
        assert_eq!(parse_interval("900").unwrap(), 900);
        assert!(parse_interval("soon").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_feed_url() {
        let content = r##"
[[feeds]]
name = "broken"
url = "not a url"
"##;
        let config: Config = toml::from_str(content).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\ntitle = \"my reader\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ui.title, "my reader");
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
