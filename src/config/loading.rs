use std::{fs, path::Path};

use tracing::{debug, info, instrument};

use super::{Config, ConfigPaths};
use crate::{MirrorError, Result};

const CONFIG_HEADER: &str = "# mediamirror configuration file\n\n";

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or if loading the file fails (see [`Config::load`]).
    pub fn load_default() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        Self::load(&path)
    }

    /// Loads a configuration file, creating a default one if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The default file cannot be created
    /// - The configuration file cannot be read
    /// - The TOML content is invalid
    /// - The values fail validation
    #[instrument]
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            info!("No configuration found, writing defaults");
            create_default_config_file(path)?;
        }

        let content = fs::read_to_string(path).map_err(|e| MirrorError::IoError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let config = Self::from_toml(&content, Some(path))?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::TomlParseError` for invalid TOML and
    /// `MirrorError::ConfigValidation` for invalid values.
    pub fn from_toml(content: &str, path: Option<&Path>) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| MirrorError::toml_parse(e, path))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::ConfigValidation` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.display.dim_after_playing_secs == 0 {
            return Err(MirrorError::ConfigValidation {
                component: "display".to_string(),
                details: "dim_after_playing_secs must be greater than zero".to_string(),
            });
        }

        if self.display.dim_after_paused_secs == 0 {
            return Err(MirrorError::ConfigValidation {
                component: "display".to_string(),
                details: "dim_after_paused_secs must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Creates a configuration file holding the defaults
fn create_default_config_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MirrorError::IoError {
            path: parent.to_path_buf(),
            details: format!("Failed to create config directory: {e}"),
        })?;
    }

    let defaults = toml::to_string_pretty(&Config::default()).map_err(|e| {
        MirrorError::ConfigValidation {
            component: "defaults".to_string(),
            details: e.to_string(),
        }
    })?;

    fs::write(path, format!("{CONFIG_HEADER}{defaults}")).map_err(|e| MirrorError::IoError {
        path: path.to_path_buf(),
        details: format!("Failed to create config file: {e}"),
    })?;

    Ok(())
}
