//! Defines the `Config` struct and its implementation.

use std::path::PathBuf;

use crate::adapters::OutputMode;

/// Saved defaults for generation runs.
///
/// Every field is optional; anything left out falls back to command-line
/// flags or to what can be detected in the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Target ids such as `claude` or `cursor`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
    /// Category ids such as `injection`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Preferred output mode for targets that support both
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<OutputMode>,
    /// Framework label, overriding detection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Directory of `<category>.md` files replacing the built-in templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `self` with every unset field taken from `fallback`.
    pub fn or(self, fallback: Config) -> Config {
        Config {
            targets: self.targets.or(fallback.targets),
            categories: self.categories.or(fallback.categories),
            mode: self.mode.or(fallback.mode),
            framework: self.framework.or(fallback.framework),
            templates_dir: self.templates_dir.or(fallback.templates_dir),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
