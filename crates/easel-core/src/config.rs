//! Toolkit defaults, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "EASEL_CONFIG";

/// Errors while loading a [`ToolkitConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Defaults applied to new windows and shapes.
///
/// Missing keys fall back to [`ToolkitConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Title used when a window is opened without one.
    pub default_title: String,
    /// Background color of new windows.
    pub background: String,
    pub font_family: String,
    pub font_size: u32,
    pub text_color: String,
    /// Outline color of new box and point-list shapes.
    pub outline_color: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            default_title: "easel".to_string(),
            background: "white".to_string(),
            font_family: "Helvetica".to_string(),
            font_size: 16,
            text_color: "black".to_string(),
            outline_color: "black".to_string(),
        }
    }
}

impl ToolkitConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by `EASEL_CONFIG`, or use the defaults.
    ///
    /// A file that cannot be read or parsed is logged and ignored.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {path}");
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {path}: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ToolkitConfig::from_json(r#"{ "font_size": 24 }"#).unwrap();
        assert_eq!(config.font_size, 24);
        assert_eq!(config.font_family, "Helvetica");
        assert_eq!(config.background, "white");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_title": "sketch", "outline_color": "navy" }}"#).unwrap();

        let config = ToolkitConfig::load(file.path()).unwrap();
        assert_eq!(config.default_title, "sketch");
        assert_eq!(config.outline_color, "navy");
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            ToolkitConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ToolkitConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ToolkitConfig {
            font_size: 12,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(ToolkitConfig::from_json(&json).unwrap(), config);
    }
}
