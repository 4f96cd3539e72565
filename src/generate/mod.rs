//! Generation and removal runs.
//!
//! A run loads the selected templates, asks each target's adapter to render
//! them, folds file-scoped output into existing files and finally writes the
//! result. In a dry run the same changes are computed and returned without
//! touching the filesystem.

pub mod changes;
pub mod remove;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::adapters::{adapter_for, Adapter, OutputPlan, RenderOptions, TargetId};
use crate::config::RunConfiguration;
use crate::error::{Error, Result};
use crate::region::RegionError;
use crate::templates::{load_many, Section, TemplateStore};

pub use changes::{apply, Action, FileChange};
use changes::read_existing;
pub use remove::{remove, RemovalReport};

/// A target whose host file could not be merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    pub target: TargetId,
    pub path: PathBuf,
    pub error: RegionError,
}

/// Changes planned (and, outside dry runs, applied) for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetChanges {
    pub target: TargetId,
    pub changes: Vec<FileChange>,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub targets: Vec<TargetChanges>,
    pub failures: Vec<TargetFailure>,
}

impl GenerationReport {
    /// Every change across all targets.
    pub fn changes(&self) -> impl Iterator<Item = &FileChange> {
        self.targets.iter().flat_map(|t| t.changes.iter())
    }

    pub fn file_count(&self) -> usize {
        self.changes().count()
    }

    /// Converts target failures into an error once the report has been shown.
    pub fn into_result(self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(Error::TargetsFailed(self.failures.len()))
        }
    }
}

/// Runs generation for `config` against the project at `root`.
///
/// Targets are processed in order, each planned and then written before the
/// next one starts. A target whose host file has a malformed owned region is
/// skipped and recorded in [`GenerationReport::failures`].
///
/// # Errors
///
/// Returns [`Error::NoTemplates`] when none of the selected categories has a
/// template (nothing is written), and [`Error::Io`] when reading or writing a
/// file fails. Targets written before an I/O failure are not rolled back.
pub fn generate<P: AsRef<Path>>(
    root: P,
    config: &RunConfiguration,
    store: &dyn TemplateStore,
) -> Result<GenerationReport> {
    let root = root.as_ref();
    let templates = load_many(store, &config.categories);
    if templates.is_empty() {
        return Err(Error::NoTemplates);
    }

    let sections = templates.sections(&config.categories);
    let category_ids: Vec<&str> = sections.iter().map(|s| s.category.id).collect();
    let options = RenderOptions::new(config.framework.clone(), config.version.clone());

    let mut report = GenerationReport {
        root: root.to_path_buf(),
        dry_run: config.dry_run,
        targets: Vec::new(),
        failures: Vec::new(),
    };

    for &id in &config.targets {
        let adapter = adapter_for(id);
        let plan = adapter.target().plan(config.mode, root);
        let changes = match plan_target(adapter.as_ref(), &plan, &sections, &category_ids, &options)
        {
            Ok(changes) => changes,
            Err(Error::Region { path, source }) => {
                warn!(target_id = %id, path = %path.display(), error = %source, "skipping target");
                report.failures.push(TargetFailure {
                    target: id,
                    path,
                    error: source,
                });
                continue;
            }
            Err(e) => return Err(e),
        };

        if !config.dry_run {
            apply(&changes)?;
            info!(target_id = %id, files = changes.len(), "wrote target");
        }
        report.targets.push(TargetChanges {
            target: id,
            changes,
        });
    }

    Ok(report)
}

/// Computes every file change for one target without writing anything.
fn plan_target(
    adapter: &dyn Adapter,
    plan: &OutputPlan,
    sections: &[Section<'_>],
    category_ids: &[&str],
    options: &RenderOptions,
) -> Result<Vec<FileChange>> {
    match plan {
        OutputPlan::Inline { file } => {
            let region = adapter.render_merged(sections, options);
            Ok(vec![plan_merge(adapter, file, &region)?])
        }
        OutputPlan::Directory { dir } => plan_rule_files(adapter, dir, sections, options),
        OutputPlan::DirectoryWithReference { file, dir } => {
            let mut changes = plan_rule_files(adapter, dir, sections, options)?;
            let reference = adapter.render_reference(category_ids, options);
            changes.push(plan_merge(adapter, file, &reference)?);
            Ok(changes)
        }
    }
}

fn plan_merge(adapter: &dyn Adapter, file: &Path, region: &str) -> Result<FileChange> {
    let existing = read_existing(file)?;
    let merged = adapter
        .merge_into_existing(existing.as_deref().unwrap_or(""), region)
        .map_err(|source| Error::Region {
            path: file.to_path_buf(),
            source,
        })?;
    Ok(FileChange::write(file.to_path_buf(), merged, existing.as_deref()))
}

fn plan_rule_files(
    adapter: &dyn Adapter,
    dir: &Path,
    sections: &[Section<'_>],
    options: &RenderOptions,
) -> Result<Vec<FileChange>> {
    adapter
        .render_multiple(sections, options)
        .into_iter()
        .map(|(name, contents)| {
            let path = dir.join(name);
            let existing = read_existing(&path)?;
            Ok(FileChange::write(path, contents, existing.as_deref()))
        })
        .collect()
}
