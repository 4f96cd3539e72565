//! Planned filesystem changes and how they are applied.
//!
//! Both generation and removal first compute the full list of changes for a
//! target with read-only operations, then either report them (dry run) or
//! apply them. The same list drives both paths.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// What happens to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    /// Rewritten with identical content.
    Unchanged,
    Delete,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Unchanged => "unchanged",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One planned file operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub action: Action,
    /// New file content; `None` for deletions.
    pub contents: Option<String>,
}

impl FileChange {
    /// Plans writing `contents` to `path`, comparing with what is there now.
    pub fn write(path: PathBuf, contents: String, existing: Option<&str>) -> Self {
        let action = match existing {
            None => Action::Create,
            Some(current) if current == contents => Action::Unchanged,
            Some(_) => Action::Update,
        };
        Self {
            path,
            action,
            contents: Some(contents),
        }
    }

    pub fn delete(path: PathBuf) -> Self {
        Self {
            path,
            action: Action::Delete,
            contents: None,
        }
    }

    /// Size in bytes of the content that would be written.
    pub fn bytes(&self) -> usize {
        self.contents.as_ref().map_or(0, String::len)
    }

    /// `path` relative to `root` when possible, for display.
    pub fn display_path(&self, root: &Path) -> String {
        self.path
            .strip_prefix(root)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}

/// Reads `path` if it exists.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io("failed to read", path, e)),
    }
}

/// Applies planned changes in order, creating parent directories as needed.
///
/// Stops at the first failure; changes applied before it stay on disk.
pub fn apply(changes: &[FileChange]) -> Result<()> {
    for change in changes {
        match &change.contents {
            Some(contents) => {
                if let Some(parent) = change.path.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|e| Error::io("failed to create directory", parent, e))?;
                }
                fs::write(&change.path, contents)
                    .map_err(|e| Error::io("failed to write", &change.path, e))?;
            }
            None => fs::remove_file(&change.path)
                .map_err(|e| Error::io("failed to remove", &change.path, e))?,
        }
        debug!(path = %change.path.display(), action = %change.action, "applied change");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_actions() {
        let path = PathBuf::from("x.md");
        assert_eq!(
            FileChange::write(path.clone(), "a".into(), None).action,
            Action::Create
        );
        assert_eq!(
            FileChange::write(path.clone(), "a".into(), Some("a")).action,
            Action::Unchanged
        );
        assert_eq!(
            FileChange::write(path, "a".into(), Some("b")).action,
            Action::Update
        );
    }

    #[test]
    fn test_apply_creates_parents_and_deletes() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join(".cursor/rules/security-ssrf.mdc");
        let doomed = dir.path().join("old.md");
        fs::write(&doomed, "bye").unwrap();

        let changes = [
            FileChange::write(nested.clone(), "rule".into(), None),
            FileChange::delete(doomed.clone()),
        ];
        apply(&changes).unwrap();

        assert_eq!(fs::read_to_string(&nested).unwrap(), "rule");
        assert!(!doomed.exists());
    }

    #[test]
    fn test_apply_reports_failing_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.md");

        let err = apply(&[FileChange::delete(missing.clone())]).unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_display_path_is_relative() {
        let change = FileChange::delete(PathBuf::from("/p/.cursor/rules/a.mdc"));
        assert_eq!(change.display_path(Path::new("/p")), ".cursor/rules/a.mdc");
        assert_eq!(change.bytes(), 0);
    }
}
