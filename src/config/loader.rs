// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::layers::merge_layers;
use crate::config::model::{ConfigOverrides, DeploySettings};
use crate::config::validate::validate_settings;
use crate::errors::{DeployError, Result};

/// Load a config file from a given path.
///
/// This only performs TOML deserialization; unknown keys are rejected but no
/// semantic validation happens here.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigOverrides> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: ConfigOverrides = toml::from_str(&contents)?;

    Ok(config)
}

/// Locate and load the file layer.
///
/// - An explicitly named file must exist.
/// - The default file is optional: if it's missing, there is no file layer.
pub fn load_file_layer(explicit: Option<&Path>) -> Result<Option<ConfigOverrides>> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(DeployError::ConfigError(format!(
                    "config file {:?} does not exist",
                    path
                )));
            }
            load_from_path(path).map(Some)
        }
        None => {
            let path = default_config_path();
            if path.is_file() {
                debug!(path = ?path, "loading default config file");
                load_from_path(&path).map(Some)
            } else {
                debug!(path = ?path, "no default config file; using built-in defaults");
                Ok(None)
            }
        }
    }
}

/// Resolve the final settings: defaults, then file, then CLI overrides.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_resolve(
    explicit: Option<&Path>,
    cli: &ConfigOverrides,
) -> Result<DeploySettings> {
    let file = load_file_layer(explicit)?;
    let settings = merge_layers(file.iter().chain(std::iter::once(cli)));
    validate_settings(&settings)?;
    Ok(settings)
}

/// Config file looked up in the working directory when `--config` is absent.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Deploy.toml")
}
