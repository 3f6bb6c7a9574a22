//! Configuration management for Fastype.
//!
//! Parses `fastype.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Caller overrides can be applied during load via [`Overrides`].
//!
//! ```toml
//! [render]
//! heading_offset = 2
//! blockquote_class = "blockquote-type2"
//! link_rel = "nofollow noopener noreferrer"
//! link_target = "_blank"
//! inline_code_style = "color: rgb(112, 112, 112);"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override the heading level offset.
    pub heading_offset: Option<u32>,
    /// Override the block quote CSS class.
    pub blockquote_class: Option<String>,
    /// Override the link `rel` attribute.
    pub link_rel: Option<String>,
    /// Override the link `target` attribute.
    pub link_target: Option<String>,
    /// Override the inline code style.
    pub inline_code_style: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "fastype.toml";

/// Largest accepted `render.heading_offset`.
const MAX_HEADING_OFFSET: u32 = 6;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Platform rendering rules.
///
/// Defaults are the values the publishing platform expects.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Added to every heading level before rendering.
    pub heading_offset: u32,
    /// CSS class placed on every `<blockquote>`.
    pub blockquote_class: String,
    /// `rel` attribute placed on every link.
    pub link_rel: String,
    /// `target` attribute placed on every link.
    pub link_target: String,
    /// Inline style of the span wrapping inline code.
    pub inline_code_style: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            heading_offset: 2,
            blockquote_class: "blockquote-type2".to_owned(),
            link_rel: "nofollow noopener noreferrer".to_owned(),
            link_target: "_blank".to_owned(),
            inline_code_style: "color: rgb(112, 112, 112);".to_owned(),
        }
    }
}

impl RenderConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heading_offset > MAX_HEADING_OFFSET {
            return Err(ConfigError::Validation(format!(
                "render.heading_offset cannot exceed {MAX_HEADING_OFFSET}"
            )));
        }
        require_non_empty(&self.blockquote_class, "render.blockquote_class")?;
        require_non_empty(&self.link_rel, "render.link_rel")?;
        require_non_empty(&self.link_target, "render.link_target")?;
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `fastype.toml` in current directory and parents.
    /// Falls back to defaults when nothing is found.
    ///
    /// Overrides are applied after loading and validated with the rest of the
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if parsing fails or the configuration is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(offset) = overrides.heading_offset {
            self.render.heading_offset = offset;
        }
        if let Some(class) = &overrides.blockquote_class {
            self.render.blockquote_class.clone_from(class);
        }
        if let Some(rel) = &overrides.link_rel {
            self.render.link_rel.clone_from(rel);
        }
        if let Some(target) = &overrides.link_target {
            self.render.link_target.clone_from(target);
        }
        if let Some(style) = &overrides.inline_code_style {
            self.render.inline_code_style.clone_from(style);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse config");
        })?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}
