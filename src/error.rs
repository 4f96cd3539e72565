//! Error types shared by the library and the binary.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::region::RegionError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can stop a generation or removal run.
#[derive(Debug, Error)]
pub enum Error {
    /// None of the requested categories had a template.
    #[error("no security rule templates found for the selected categories")]
    NoTemplates,

    /// A host file holds an owned region that cannot be merged.
    #[error("cannot update {}: {source}", path.display())]
    Region {
        path: PathBuf,
        #[source]
        source: RegionError,
    },

    /// A filesystem operation failed.
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A defaults file exists but could not be parsed.
    #[error("failed to parse configuration file at {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// One or more targets were skipped because of malformed host files.
    #[error("{0} target(s) could not be updated")]
    TargetsFailed(usize),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_path() {
        let err = Error::io(
            "failed to write",
            Path::new("CLAUDE.md"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("failed to write CLAUDE.md"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_region_error_names_the_path() {
        let err = Error::Region {
            path: PathBuf::from("AGENTS.md"),
            source: RegionError::Unterminated { offset: 12 },
        };
        assert!(err.to_string().starts_with("cannot update AGENTS.md"));
    }
}
