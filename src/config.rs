use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use supports_color::Stream;

pub const DEFAULT_LOADING_MESSAGE: &str = "! Loading...";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub interactive: InteractiveConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// "auto" styles output only when stdout supports color
    #[serde(default)]
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractiveConfig {
    /// Shown while a lazy branch or leaf is being resolved
    #[serde(default = "default_loading_message")]
    pub loading_message: String,

    #[serde(default = "default_show_loading")]
    pub show_loading: bool,
}

impl Default for InteractiveConfig {
    fn default() -> Self {
        Self {
            loading_message: default_loading_message(),
            show_loading: default_show_loading(),
        }
    }
}

fn default_loading_message() -> String {
    DEFAULT_LOADING_MESSAGE.to_string()
}

fn default_show_loading() -> bool {
    true
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/self-help/config.toml
    /// - Linux: ~/.config/self-help/config.toml
    /// - Windows: %APPDATA%/self-help/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("self-help").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load config from a specific file. Missing or malformed files give the
    /// defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Whether terminal output should be styled. `plain` comes from the CLI
    /// and wins over the config file.
    pub fn use_color(&self, plain: bool) -> bool {
        if plain {
            return false;
        }
        match self.output.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => supports_color::on(Stream::Stdout).is_some(),
        }
    }
}
