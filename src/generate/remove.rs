//! Removal of everything the generator has written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::changes::{apply, read_existing, FileChange};
use super::TargetFailure;
use crate::adapters::{target, RulesDir, Target, TargetId};
use crate::error::{Error, Result};
use crate::region;

/// Outcome of a removal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub changes: Vec<FileChange>,
    pub failures: Vec<TargetFailure>,
}

impl RemovalReport {
    /// True when nothing generated was found.
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty() && self.failures.is_empty()
    }

    pub fn into_result(self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(Error::TargetsFailed(self.failures.len()))
        }
    }
}

/// Removes generated content for every target under `root`.
///
/// Owned regions are stripped from host files, and a host file left empty is
/// deleted. Every file in a rules directory that follows the generated naming
/// convention is deleted regardless of which categories produced it. Other
/// files are never touched. With `dry_run` the report lists what would change.
pub fn remove<P: AsRef<Path>>(root: P, dry_run: bool) -> Result<RemovalReport> {
    let root = root.as_ref();
    let mut report = RemovalReport {
        root: root.to_path_buf(),
        dry_run,
        changes: Vec::new(),
        failures: Vec::new(),
    };

    for id in TargetId::ALL {
        let t = target(id);
        let mut changes = Vec::new();

        if let Some(file) = t.single_file {
            let path = root.join(file);
            match plan_strip(&t, &path) {
                Ok(Some(change)) => changes.push(change),
                Ok(None) => {}
                Err(Error::Region { path, source }) => {
                    warn!(target_id = %id, path = %path.display(), error = %source, "leaving file untouched");
                    report.failures.push(TargetFailure {
                        target: id,
                        path,
                        error: source,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        if let Some(dir) = t.directory {
            changes.extend(generated_files(&root.join(dir.path), &dir)?);
        }

        if changes.is_empty() {
            debug!(target_id = %id, "nothing to remove");
            continue;
        }
        if !dry_run {
            apply(&changes)?;
            info!(target_id = %id, files = changes.len(), "removed generated content");
        }
        report.changes.extend(changes);
    }

    Ok(report)
}

fn plan_strip(target: &Target, path: &Path) -> Result<Option<FileChange>> {
    let Some(existing) = read_existing(path)? else {
        return Ok(None);
    };
    let stripped = region::strip(&existing, &target.sentinels).map_err(|source| Error::Region {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(stripped.map(|remaining| {
        if remaining.is_empty() {
            FileChange::delete(path.to_path_buf())
        } else {
            FileChange::write(path.to_path_buf(), remaining, Some(existing.as_str()))
        }
    }))
}

fn generated_files(dir: &Path, rules: &RulesDir) -> Result<Vec<FileChange>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io("failed to read directory", dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io("failed to read directory", dir, e))?;
        let path = entry.path();
        let is_generated = entry
            .file_name()
            .to_str()
            .is_some_and(|name| rules.is_generated(name));
        if is_generated && path.is_file() {
            files.push(FileChange::delete(path));
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
