//! Service configuration module.
//!
//! Handles loading, validating, and layering the service settings. Values
//! are resolved in this order, later layers winning:
//!
//! ```text
//! stock defaults  →  hand-zoom.toml  →  PORT env var  →  --host / --port flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [server]
//! host = "0.0.0.0"              # Listen address (all interfaces, LAN use)
//! port = 8000                   # Listen port; PORT env var overrides
//! max_upload_bytes = 33554432   # Request body limit (32 MiB)
//!
//! [zoom]
//! default_factor = 1.5          # Used when a request omits `zoom`
//! quality = 90                  # JPEG quality for zoomed output (1-100)
//! passthrough_quality = 95      # JPEG quality when zoom == 1.0
//!
//! [gesture]
//! pixels_per_step = 50.0        # Pinch distance (px) per 1.0 of zoom
//! min_zoom = 1.0
//! max_zoom = 3.0
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown
//! keys are rejected to catch typos early.

use crate::imaging::{Quality, ZoomConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable that overrides `server.port`.
pub const PORT_ENV: &str = "PORT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Service configuration loaded from `hand-zoom.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Listener and request limits.
    pub server: ServerConfig,
    /// Zoom transform defaults and encoding quality.
    pub zoom: ZoomSettings,
    /// Pinch-distance to zoom mapping.
    pub gesture: GestureConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Validation(
                "server.max_upload_bytes must be greater than 0".into(),
            ));
        }
        if !(self.zoom.default_factor.is_finite() && self.zoom.default_factor > 0.0) {
            return Err(ConfigError::Validation(
                "zoom.default_factor must be > 0".into(),
            ));
        }
        for (key, value) in [
            ("zoom.quality", self.zoom.quality),
            ("zoom.passthrough_quality", self.zoom.passthrough_quality),
        ] {
            if !(1..=100).contains(&value) {
                return Err(ConfigError::Validation(format!("{key} must be 1-100")));
            }
        }
        if !(self.gesture.pixels_per_step > 0.0) {
            return Err(ConfigError::Validation(
                "gesture.pixels_per_step must be > 0".into(),
            ));
        }
        if !(self.gesture.min_zoom > 0.0) {
            return Err(ConfigError::Validation(
                "gesture.min_zoom must be > 0".into(),
            ));
        }
        if self.gesture.min_zoom > self.gesture.max_zoom {
            return Err(ConfigError::Validation(
                "gesture.min_zoom must not exceed gesture.max_zoom".into(),
            ));
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Zoom transform settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomSettings {
    /// Factor used when a request has no `zoom` field.
    pub default_factor: f64,
    /// JPEG quality for cropped/letterboxed output.
    pub quality: u32,
    /// JPEG quality when the factor is 1.0.
    pub passthrough_quality: u32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            default_factor: 1.5,
            quality: 90,
            passthrough_quality: 95,
        }
    }
}

impl ZoomSettings {
    /// Encoding settings for [`apply_zoom`](crate::imaging::apply_zoom).
    pub fn encoding(&self) -> ZoomConfig {
        ZoomConfig {
            quality: Quality::new(self.quality),
            passthrough_quality: Quality::new(self.passthrough_quality),
        }
    }
}

/// Pinch gesture mapping: `zoom = clamp(distance / pixels_per_step, min_zoom, max_zoom)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    pub pixels_per_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pixels_per_step: 50.0,
            min_zoom: 1.0,
            max_zoom: 3.0,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Apply environment overrides, reading variables through `lookup`.
///
/// Taking the lookup as a parameter keeps tests independent of the process
/// environment.
pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    if let Some(raw) = lookup(PORT_ENV) {
        config.server.port = raw.trim().parse().map_err(|_| {
            ConfigError::Validation(format!("{PORT_ENV} must be a port number, got {raw:?}"))
        })?;
    }
    Ok(config)
}

/// Load config from `path` (missing file means stock defaults), then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    let config = resolve_config(base, overlay)?;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Returns a fully-commented stock `hand-zoom.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# hand-zoom Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# HTTP server
# ---------------------------------------------------------------------------
[server]
# Address to bind. 0.0.0.0 accepts connections from the whole LAN.
host = "0.0.0.0"

# Port to bind. The PORT environment variable overrides this value,
# and the --port flag overrides both.
port = 8000

# Largest accepted upload, in bytes.
max_upload_bytes = 33554432

# ---------------------------------------------------------------------------
# Zoom transform
# ---------------------------------------------------------------------------
[zoom]
# Factor used when an upload has no `zoom` form field.
default_factor = 1.5

# JPEG quality for zoomed output (1 = worst, 100 = best).
quality = 90

# JPEG quality when zoom is 1.0 and the image is only re-encoded.
passthrough_quality = 95

# ---------------------------------------------------------------------------
# Pinch gesture estimation
# ---------------------------------------------------------------------------
[gesture]
# Pixels of thumb-to-index distance per 1.0 of zoom.
pixels_per_step = 50.0

# The estimate is clamped to [min_zoom, max_zoom].
min_zoom = 1.0
max_zoom = 3.0
"##
}
