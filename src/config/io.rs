//! Handles all file input/output operations for the configuration.

use super::path::{get_config_file_path, project_config_path};
use super::structure::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads the defaults that apply to a project rooted at `root`.
///
/// The project-local `.secrules.json` wins field by field over the user-level
/// configuration file; missing files are treated as empty.
///
/// # Errors
///
/// Returns an error if either file exists but cannot be read or parsed
pub fn load_config<P: AsRef<Path>>(root: P) -> Result<Config> {
    let project = load_config_from_file(project_config_path(root))?;
    let user = match get_config_file_path() {
        Ok(path) => load_config_from_file(path)?,
        Err(e) => {
            debug!(error = %e, "no user configuration directory");
            Config::default()
        }
    };
    Ok(project.or(user))
}

/// Loads configuration from a specific file path
///
/// # Arguments
///
/// * `config_path` - Path to the configuration file
///
/// # Errors
///
/// Returns an error if file reading or JSON parsing fails
pub fn load_config_from_file<P: AsRef<Path>>(config_path: P) -> Result<Config> {
    let config_path = config_path.as_ref();

    // If config file doesn't exist, return default config
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(config_path)
        .map_err(|e| Error::io("failed to read", config_path, e))?;

    // Handle empty file case
    let trimmed_content = config_content.trim();
    if trimmed_content.is_empty() {
        return Ok(Config::default());
    }

    let config = serde_json::from_str(trimmed_content).map_err(|source| Error::Config {
        path: config_path.to_path_buf(),
        source,
    })?;
    debug!(path = %config_path.display(), "loaded configuration");
    Ok(config)
}

/// Saves configuration to a specific file path
///
/// The file is written to a temporary sibling first and renamed into place.
///
/// # Arguments
///
/// * `config` - The configuration to save
/// * `config_path` - Path to the configuration file
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails
pub fn save_config_to_file<P: AsRef<Path>>(config: &Config, config_path: P) -> Result<()> {
    let config_path = config_path.as_ref();

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::io("failed to create directory", parent, e))?;
    }

    let mut config_content = serde_json::to_string_pretty(config).map_err(|source| {
        Error::Config {
            path: config_path.to_path_buf(),
            source,
        }
    })?;

    // Ensure the file ends with a newline
    if !config_content.ends_with('\n') {
        config_content.push('\n');
    }

    let temp_path = config_path.with_extension("json.tmp");
    fs::write(&temp_path, config_content)
        .map_err(|e| Error::io("failed to write", &temp_path, e))?;
    fs::rename(&temp_path, config_path)
        .map_err(|e| Error::io("failed to replace", config_path, e))?;
    Ok(())
}
