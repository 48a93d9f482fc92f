//! Configuration management for the docs components.
//!
//! Provides TOML-based configuration for the code block stylesheet and the
//! logging filter. Every section falls back to defaults, so a partial file
//! (or no file at all) is valid.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Colours and shape of the code block stylesheet
    pub theme: ThemeConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl DocsConfig {
    /// Load configuration from `path`, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    /// - A value fails validation
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            Self::from_toml_str(&contents)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default path of the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/rin-docs/config.toml`
    pub fn default_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("tech", "pskinner", "rin-docs").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check values that TOML typing alone cannot rule out.
    pub fn validate(&self) -> ConfigResult<()> {
        self.theme.validate()?;
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.filter".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Stylesheet settings of the code block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Background of the `<pre>` region
    pub code_background: String,
    /// Background of the label and button overlays
    pub overlay_background: String,
    /// Background of the button while hovered
    pub overlay_hover_background: String,
    /// Text colour of the overlays
    pub text_color: String,
    /// Corner radius of the block in rem
    pub border_radius_rem: f32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            code_background: "#1e1e1e".to_string(),
            overlay_background: "rgba(255, 255, 255, 0.1)".to_string(),
            overlay_hover_background: "rgba(255, 255, 255, 0.2)".to_string(),
            text_color: "#e0e0e0".to_string(),
            border_radius_rem: 0.375,
        }
    }
}

impl ThemeConfig {
    fn validate(&self) -> ConfigResult<()> {
        let colours = [
            ("theme.code_background", &self.code_background),
            ("theme.overlay_background", &self.overlay_background),
            ("theme.overlay_hover_background", &self.overlay_hover_background),
            ("theme.text_color", &self.text_color),
        ];
        for (field, value) in colours {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "colour must not be empty".to_string(),
                });
            }
            // Values are spliced into a stylesheet
            if value.contains(['{', '}', ';', '<']) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("'{value}' is not a CSS colour"),
                });
            }
        }

        if !self.border_radius_rem.is_finite() || self.border_radius_rem < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "theme.border_radius_rem".to_string(),
                reason: format!("must be a non-negative number, got {}", self.border_radius_rem),
            });
        }
        Ok(())
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,rin_docs=debug".to_string(),
        }
    }
}
