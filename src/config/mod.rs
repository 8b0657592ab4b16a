//! Configuration schema definitions and loading.
//!
//! Defines the complete configuration structure for mediamirror. All
//! configurations are serializable to/from TOML format, and every section
//! falls back to defaults when omitted.

mod display;
mod general;
mod loading;
mod media;
mod paths;

#[cfg(test)]
mod tests;

pub use display::DisplayConfig;
pub use general::{GeneralConfig, LogLevel};
pub use media::MediaConfig;
pub use paths::ConfigPaths;

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

/// Main configuration structure for mediamirror.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Media session observation settings.
    #[serde(default)]
    pub media: MediaConfig,

    /// Display dimming settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// JSON schema describing the configuration file.
    pub fn schema() -> Schema {
        schema_for!(Config)
    }
}
