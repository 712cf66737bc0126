//! Stat preset configuration, loaded from TOML
//!
//! ```toml
//! name = "goblin"
//!
//! [[stats]]
//! name = "health"
//! value = 30.0
//! min_value = 0.0     # optional
//! max_value = 60.0    # optional
//! ```

mod preset;

pub use preset::{
    default_preset, load_preset, load_preset_or_default, parse_preset, StatDefinition, StatPreset,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read preset file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid preset: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}
