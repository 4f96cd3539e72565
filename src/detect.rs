//! Project probing used to fill in defaults for non-interactive runs.

use std::fs;
use std::path::{Component, Path};

use tracing::{debug, warn};

use crate::adapters::{target, TargetId};
use crate::constants::DEFAULT_FRAMEWORK;

/// JavaScript dependencies mapped to framework labels, most specific first.
const JS_FRAMEWORKS: &[(&str, &str)] = &[
    ("next", "nextjs"),
    ("@angular/core", "angular"),
    ("@sveltejs/kit", "svelte"),
    ("svelte", "svelte"),
    ("nuxt", "vue"),
    ("vue", "vue"),
    ("react", "react"),
    ("express", "express"),
];

/// Python packages mapped to framework labels, most specific first.
const PY_FRAMEWORKS: &[(&str, &str)] = &[
    ("django", "django"),
    ("fastapi", "fastapi"),
    ("flask", "flask"),
];

/// Returns the targets whose files or directories already exist under `root`.
pub fn detect_targets<P: AsRef<Path>>(root: P) -> Vec<TargetId> {
    let root = root.as_ref();
    TargetId::ALL
        .into_iter()
        .filter(|&id| {
            let t = target(id);
            let has_file = t.single_file.is_some_and(|f| root.join(f).is_file());
            let has_dir = t.directory.is_some_and(|d| {
                // `.cursor/rules` counts as present once `.cursor` exists.
                match Path::new(d.path).components().next() {
                    Some(Component::Normal(top)) => root.join(top).is_dir(),
                    _ => false,
                }
            });
            has_file || has_dir
        })
        .collect()
}

/// Guesses the project's framework from its dependency manifests.
///
/// `package.json` is consulted first, then `requirements.txt` and
/// `pyproject.toml`. Falls back to `vanilla`.
pub fn detect_framework<P: AsRef<Path>>(root: P) -> String {
    let root = root.as_ref();
    if let Some(framework) = framework_from_package_json(&root.join("package.json")) {
        return framework;
    }
    let python = [
        requirements_txt_packages(&root.join("requirements.txt")),
        pyproject_packages(&root.join("pyproject.toml")),
    ];
    for packages in python.iter().flatten() {
        if let Some(&(_, label)) = PY_FRAMEWORKS
            .iter()
            .find(|(package, _)| packages.iter().any(|p| p.as_str() == *package))
        {
            debug!(framework = label, "detected framework from python manifest");
            return label.to_string();
        }
    }
    DEFAULT_FRAMEWORK.to_string()
}

fn framework_from_package_json(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let manifest: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unparsable package.json");
            return None;
        }
    };

    let has_dependency = |name: &str| {
        ["dependencies", "devDependencies", "peerDependencies"]
            .iter()
            .any(|section| manifest.get(section).and_then(|deps| deps.get(name)).is_some())
    };

    let framework = JS_FRAMEWORKS
        .iter()
        .find(|(dependency, _)| has_dependency(dependency))
        .map_or("node", |&(_, label)| label);
    debug!(framework, "detected framework from package.json");
    Some(framework.to_string())
}

/// Normalized package name of a requirement such as `Django[argon2]>=4.2`.
fn requirement_name(requirement: &str) -> Option<String> {
    let requirement = requirement.trim();
    let end = requirement
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        .unwrap_or(requirement.len());
    let name = &requirement[..end];
    (!name.is_empty()).then(|| name.to_lowercase().replace('_', "-"))
}

fn requirements_txt_packages(path: &Path) -> Option<Vec<String>> {
    let content = fs::read_to_string(path).ok()?;
    Some(
        content
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .filter(|line| !line.trim_start().starts_with('-'))
            .filter_map(requirement_name)
            .collect(),
    )
}

/// Dependency names declared in PEP 621 `[project]` tables and in Poetry's
/// `[tool.poetry]` tables.
fn pyproject_packages(path: &Path) -> Option<Vec<String>> {
    let content = fs::read_to_string(path).ok()?;
    let manifest: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unparsable pyproject.toml");
            return None;
        }
    };

    let mut packages = Vec::new();
    let requirement_list = |value: &toml::Value| -> Vec<String> {
        value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(toml::Value::as_str)
                    .filter_map(requirement_name)
                    .collect()
            })
            .unwrap_or_default()
    };

    if let Some(project) = manifest.get("project") {
        if let Some(deps) = project.get("dependencies") {
            packages.extend(requirement_list(deps));
        }
        if let Some(extras) = project.get("optional-dependencies").and_then(toml::Value::as_table) {
            for deps in extras.values() {
                packages.extend(requirement_list(deps));
            }
        }
    }

    if let Some(poetry) = manifest.get("tool").and_then(|tool| tool.get("poetry")) {
        let mut tables: Vec<&toml::Value> = poetry.get("dependencies").into_iter().collect();
        if let Some(groups) = poetry.get("group").and_then(toml::Value::as_table) {
            tables.extend(groups.values().filter_map(|group| group.get("dependencies")));
        }
        for deps in tables.into_iter().filter_map(toml::Value::as_table) {
            packages.extend(deps.keys().filter_map(|name| requirement_name(name)));
        }
    }

    Some(packages)
}
