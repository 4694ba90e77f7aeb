// Configuration loading and parsing (config/draw.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// draw.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub display: DisplayConfig,
    pub draw: DrawConfig,
    pub roster: RosterConfig,
    pub media: MediaConfig,
}

/// Banner text shown above the stage.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DrawConfig {
    /// Milliseconds between rolling-display updates while drawing.
    pub tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible sessions. Omit for OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl DrawConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// JSON file holding the startup roster.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Largest accepted background image, in bytes.
    pub max_image_bytes: u64,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/draw.toml` relative to `base_dir`.
///
/// This does not copy defaults; prefer `load_config()`.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("draw.toml");
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/draw.toml` to `config/draw.toml` unless the operator
/// already has one. Returns whether a copy was made.
pub fn ensure_draw_config(base_dir: &Path) -> Result<bool, ConfigError> {
    let target = base_dir.join("config").join("draw.toml");
    if target.is_file() {
        return Ok(false);
    }

    let source = base_dir.join("defaults").join("draw.toml");
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither config/draw.toml nor defaults/draw.toml found in {}",
                base_dir.display()
            ),
        });
    }

    let copy_error = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    };
    std::fs::create_dir_all(base_dir.join("config")).map_err(copy_error)?;
    std::fs::copy(&source, &target).map_err(copy_error)?;
    info!("Created {} from defaults", target.display());
    Ok(true)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_draw_config(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.display.title.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "display.title".into(),
            message: "must not be empty".into(),
        });
    }

    if config.draw.tick_interval_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "draw.tick_interval_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.roster.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "roster.path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.media.max_image_bytes == 0 {
        return Err(ConfigError::ValidationError {
            field: "media.max_image_bytes".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
