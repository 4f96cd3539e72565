//! Template lookup and bulk loading.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, warn};

use super::catalog::{category, Category};
use crate::constants::FRAMEWORK_PLACEHOLDER;

/// The markdown body for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub category_id: String,
    pub body: String,
}

impl Template {
    pub fn new(category_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            body: body.into(),
        }
    }

    /// Returns the body with the framework placeholder substituted.
    pub fn render(&self, framework: &str) -> String {
        self.body.replace(FRAMEWORK_PLACEHOLDER, framework)
    }
}

/// Read-only source of templates keyed by category id.
pub trait TemplateStore: Sync {
    /// Returns the template for `category_id`, or `None` if this store has none.
    fn lookup(&self, category_id: &str) -> Option<Template>;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStore;

impl EmbeddedStore {
    fn body(category_id: &str) -> Option<&'static str> {
        let body = match category_id {
            "access-control" => include_str!("../../templates/access-control.md"),
            "authentication" => include_str!("../../templates/authentication.md"),
            "cryptography" => include_str!("../../templates/cryptography.md"),
            "data-integrity" => include_str!("../../templates/data-integrity.md"),
            "injection" => include_str!("../../templates/injection.md"),
            "ssrf" => include_str!("../../templates/ssrf.md"),
            "insecure-design" => include_str!("../../templates/insecure-design.md"),
            "misconfiguration" => include_str!("../../templates/misconfiguration.md"),
            "vulnerable-components" => include_str!("../../templates/vulnerable-components.md"),
            "logging-monitoring" => include_str!("../../templates/logging-monitoring.md"),
            _ => return None,
        };
        Some(body)
    }
}

impl TemplateStore for EmbeddedStore {
    fn lookup(&self, category_id: &str) -> Option<Template> {
        Self::body(category_id).map(|body| Template::new(category_id, body))
    }
}

/// Templates read from `<dir>/<category-id>.md`.
///
/// Used to override the built-in content with a project's own rules.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl TemplateStore for DirectoryStore {
    fn lookup(&self, category_id: &str) -> Option<Template> {
        // Ids come from user input; keep lookups inside the directory.
        if category_id.contains(['/', '\\']) || category_id.starts_with('.') {
            return None;
        }
        let path = self.dir.join(format!("{category_id}.md"));
        match fs::read_to_string(&path) {
            Ok(body) => Some(Template::new(category_id, body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read template");
                None
            }
        }
    }
}

/// The templates found for one run, keyed by category id.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: HashMap<String, Template>,
}

/// A category paired with its template, ready to render.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub category: &'static Category,
    pub template: &'a Template,
}

impl TemplateSet {
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn get(&self, category_id: &str) -> Option<&Template> {
        self.templates.get(category_id)
    }

    pub fn contains(&self, category_id: &str) -> bool {
        self.templates.contains_key(category_id)
    }

    /// Pairs loaded templates with their catalog entry, following the order
    /// of `category_ids`. Ids without a template or catalog entry are skipped.
    pub fn sections<S: AsRef<str>>(&self, category_ids: &[S]) -> Vec<Section<'_>> {
        category_ids
            .iter()
            .filter_map(|id| {
                let id = id.as_ref();
                Some(Section {
                    category: category(id)?,
                    template: self.templates.get(id)?,
                })
            })
            .collect()
    }
}

/// Loads templates for `category_ids` from `store`.
///
/// Lookups run on scoped threads and are all joined before this returns.
/// Ids the store does not know are logged as warnings and left out of the
/// result; if none are found the set is empty.
pub fn load_many<S: AsRef<str>>(store: &dyn TemplateStore, category_ids: &[S]) -> TemplateSet {
    let mut unique: Vec<&str> = Vec::with_capacity(category_ids.len());
    for id in category_ids {
        let id = id.as_ref();
        if !unique.contains(&id) {
            unique.push(id);
        }
    }

    let results: Vec<(&str, Option<Template>)> = thread::scope(|scope| {
        let handles: Vec<_> = unique
            .iter()
            .map(|&id| (id, scope.spawn(move || store.lookup(id))))
            .collect();
        handles
            .into_iter()
            .map(|(id, handle)| (id, handle.join().unwrap_or(None)))
            .collect()
    });

    let mut templates = HashMap::with_capacity(results.len());
    for (id, template) in results {
        match template {
            Some(template) => {
                debug!(category = id, "loaded template");
                templates.insert(id.to_string(), template);
            }
            None => warn!(category = id, "no template found, skipping category"),
        }
    }
    TemplateSet { templates }
}
