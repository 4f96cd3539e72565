//! The resolved, read-only input of one generation run.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::structure::Config;
use crate::adapters::{OutputMode, TargetId};
use crate::detect::{detect_framework, detect_targets};
use crate::templates::{all_category_ids, category};

/// Everything a generation run needs to know, fixed before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    pub targets: Vec<TargetId>,
    pub categories: Vec<String>,
    pub mode: OutputMode,
    pub framework: String,
    pub dry_run: bool,
    pub version: String,
}

impl RunConfiguration {
    /// A configuration for the given targets and categories with default
    /// mode, framework and version.
    pub fn new(targets: Vec<TargetId>, categories: Vec<String>) -> Self {
        Self {
            targets,
            categories,
            mode: OutputMode::default(),
            framework: crate::constants::DEFAULT_FRAMEWORK.to_string(),
            dry_run: false,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Values given explicitly for this invocation (flags or interactive answers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub targets: Vec<TargetId>,
    pub categories: Vec<String>,
    pub mode: Option<OutputMode>,
    pub framework: Option<String>,
    pub templates_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// Builds the run configuration for the project at `root`.
///
/// Explicit overrides win over saved defaults, which win over what is
/// detected in the project. Unknown target and category ids are dropped
/// without error. With nothing selected anywhere, targets come from
/// detection (falling back to Claude) and every category is included.
pub fn resolve<P: AsRef<Path>>(root: P, overrides: &Overrides, saved: &Config) -> RunConfiguration {
    let root = root.as_ref();

    let targets = if !overrides.targets.is_empty() {
        dedup(overrides.targets.clone())
    } else if let Some(ids) = &saved.targets {
        dedup(ids.iter().filter_map(|id| parse_target(id)).collect())
    } else {
        let detected = detect_targets(root);
        if detected.is_empty() {
            vec![TargetId::Claude]
        } else {
            detected
        }
    };

    let categories = if !overrides.categories.is_empty() {
        known_categories(&overrides.categories)
    } else if let Some(ids) = &saved.categories {
        known_categories(ids)
    } else {
        all_category_ids()
    };

    let framework = overrides
        .framework
        .clone()
        .or_else(|| saved.framework.clone())
        .unwrap_or_else(|| detect_framework(root));

    RunConfiguration {
        targets,
        categories,
        mode: overrides.mode.or(saved.mode).unwrap_or_default(),
        framework,
        dry_run: overrides.dry_run,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn parse_target(id: &str) -> Option<TargetId> {
    let parsed = TargetId::parse(&id.trim().to_lowercase());
    if parsed.is_none() {
        debug!(target_id = id, "ignoring unknown target");
    }
    parsed
}

fn known_categories(ids: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        let id = id.trim();
        if category(id).is_none() {
            debug!(category = id, "ignoring unknown category");
            continue;
        }
        if !out.iter().any(|known| known == id) {
            out.push(id.to_string());
        }
    }
    out
}

fn dedup(targets: Vec<TargetId>) -> Vec<TargetId> {
    let mut out = Vec::with_capacity(targets.len());
    for t in targets {
        if !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_for_empty_project() {
        let dir = tempdir().unwrap();
        let run = resolve(dir.path(), &Overrides::default(), &Config::default());

        assert_eq!(run.targets, [TargetId::Claude]);
        assert_eq!(run.categories, all_category_ids());
        assert_eq!(run.mode, OutputMode::Inline);
        assert_eq!(run.framework, "vanilla");
        assert!(!run.dry_run);
        assert_eq!(run.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_detection_fills_targets_and_framework() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".windsurf")).unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "dependencies": { "react": "18" } }"#,
        )
        .unwrap();

        let run = resolve(dir.path(), &Overrides::default(), &Config::default());
        assert_eq!(run.targets, [TargetId::Windsurf]);
        assert_eq!(run.framework, "react");
    }

    #[test]
    fn test_overrides_beat_saved_defaults() {
        let dir = tempdir().unwrap();
        let saved = Config {
            targets: Some(vec!["cursor".to_string()]),
            framework: Some("vue".to_string()),
            mode: Some(OutputMode::Directory),
            ..Config::default()
        };
        let overrides = Overrides {
            targets: vec![TargetId::Copilot, TargetId::Copilot],
            framework: Some("react".to_string()),
            dry_run: true,
            ..Overrides::default()
        };

        let run = resolve(dir.path(), &overrides, &saved);
        assert_eq!(run.targets, [TargetId::Copilot]);
        assert_eq!(run.framework, "react");
        assert_eq!(run.mode, OutputMode::Directory);
        assert!(run.dry_run);
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let dir = tempdir().unwrap();
        let saved = Config {
            targets: Some(vec!["vim".to_string(), "Gemini".to_string()]),
            categories: Some(vec![
                "injection".to_string(),
                "not-real".to_string(),
                "injection".to_string(),
            ]),
            ..Config::default()
        };

        let run = resolve(dir.path(), &Overrides::default(), &saved);
        assert_eq!(run.targets, [TargetId::Gemini]);
        assert_eq!(run.categories, ["injection"]);
    }

    #[test]
    fn test_only_unknown_categories_leaves_selection_empty() {
        let dir = tempdir().unwrap();
        let overrides = Overrides {
            categories: vec!["nope".to_string()],
            ..Overrides::default()
        };
        let run = resolve(dir.path(), &overrides, &Config::default());
        assert!(run.categories.is_empty());
    }
}
