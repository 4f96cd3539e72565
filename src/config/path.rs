//! Handles the logic for determining the configuration file paths.

use directories::ProjectDirs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::PROJECT_CONFIG_FILENAME;

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Application name used for the configuration directory
const APP_NAME: &str = "secrules";

/// Returns the path to the user-level configuration file
///
/// Uses the platform-specific application configuration directory according to:
/// - Linux: `$XDG_CONFIG_HOME/secrules/config.json` or `$HOME/.config/secrules/config.json`
/// - macOS: `$HOME/Library/Application Support/secrules/config.json`
/// - Windows: `%APPDATA%/secrules/config.json`
///
/// Falls back to `$HOME/.config/secrules/config.json` if platform-specific directories cannot be determined.
///
/// # Errors
///
/// Returns an error if the configuration directory cannot be determined
pub fn get_config_file_path() -> io::Result<PathBuf> {
    if let Some(project_dirs) = ProjectDirs::from("", "", APP_NAME) {
        return Ok(project_dirs.config_dir().join(CONFIG_FILE_NAME));
    }

    let home_dir = std::env::var("HOME").map_err(|_| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Unable to determine home directory for configuration path",
        )
    })?;

    Ok(Path::new(&home_dir)
        .join(".config")
        .join(APP_NAME)
        .join(CONFIG_FILE_NAME))
}

/// Returns the path of the project-local defaults file under `root`
pub fn project_config_path<P: AsRef<Path>>(root: P) -> PathBuf {
    root.as_ref().join(PROJECT_CONFIG_FILENAME)
}
