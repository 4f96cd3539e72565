//! Output destinations and the modes they support.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    AGENTS_FILENAME, CLAUDE_FILENAME, CLAUDE_RULES_DIR, COPILOT_FILENAME, CURSOR_RULES_DIR,
    GEMINI_FILENAME, RULE_FILE_PREFIX, WINDSURF_RULES_DIR,
};
use crate::region::Sentinels;

/// Identifier of a supported AI assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetId {
    Claude,
    Gemini,
    Agents,
    Copilot,
    Cursor,
    Windsurf,
}

impl TargetId {
    /// Every target, in the order they are processed.
    pub const ALL: [TargetId; 6] = [
        Self::Claude,
        Self::Gemini,
        Self::Agents,
        Self::Copilot,
        Self::Cursor,
        Self::Windsurf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Agents => "agents",
            Self::Copilot => "copilot",
            Self::Cursor => "cursor",
            Self::Windsurf => "windsurf",
        }
    }

    /// Parses a lowercase id, returning `None` for anything unknown.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How rule content should be laid out when a target supports both shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Embed every rule in the primary instructions file.
    #[default]
    Inline,
    /// Write one file per category and reference them from the primary file.
    Directory,
}

/// A directory holding one generated file per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesDir {
    pub path: &'static str,
    pub extension: &'static str,
}

impl RulesDir {
    /// File name for a category, e.g. `security-injection.mdc`.
    pub fn file_name(&self, category_id: &str) -> String {
        format!("{RULE_FILE_PREFIX}{category_id}{}", self.extension)
    }

    /// Path of a category's file relative to the project root.
    pub fn relative_path(&self, category_id: &str) -> String {
        format!("{}/{}", self.path, self.file_name(category_id))
    }

    /// Whether `file_name` follows the generated naming convention.
    pub fn is_generated(&self, file_name: &str) -> bool {
        file_name.len() > RULE_FILE_PREFIX.len() + self.extension.len()
            && file_name.starts_with(RULE_FILE_PREFIX)
            && file_name.ends_with(self.extension)
    }
}

/// One AI-assistant consumer and where its files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: TargetId,
    pub name: &'static str,
    pub single_file: Option<&'static str>,
    pub directory: Option<RulesDir>,
    pub sentinels: Sentinels,
}

/// The output shape chosen for a target in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPlan {
    /// All rules merged into one file.
    Inline { file: PathBuf },
    /// One file per category, no primary file.
    Directory { dir: PathBuf },
    /// One file per category plus a reference merged into the primary file.
    DirectoryWithReference { file: PathBuf, dir: PathBuf },
}

impl Target {
    pub fn supports_merge(&self) -> bool {
        self.single_file.is_some()
    }

    pub fn supports_directory_mode(&self) -> bool {
        self.directory.is_some()
    }

    /// Resolves the output shape for `mode` under the project `root`.
    ///
    /// Directory-only targets ignore `mode`; single-file-only targets always
    /// inline.
    pub fn plan(&self, mode: OutputMode, root: &Path) -> OutputPlan {
        match (self.single_file, self.directory, mode) {
            (Some(file), Some(dir), OutputMode::Directory) => OutputPlan::DirectoryWithReference {
                file: root.join(file),
                dir: root.join(dir.path),
            },
            (Some(file), _, _) => OutputPlan::Inline {
                file: root.join(file),
            },
            (None, Some(dir), _) => OutputPlan::Directory {
                dir: root.join(dir.path),
            },
            (None, None, _) => unreachable!("target {} has no output", self.id),
        }
    }
}

/// Returns the static description of a target.
pub fn target(id: TargetId) -> Target {
    let sentinels = Sentinels::default();
    match id {
        TargetId::Claude => Target {
            id,
            name: "Claude Code",
            single_file: Some(CLAUDE_FILENAME),
            directory: Some(RulesDir {
                path: CLAUDE_RULES_DIR,
                extension: ".md",
            }),
            sentinels,
        },
        TargetId::Gemini => Target {
            id,
            name: "Gemini CLI",
            single_file: Some(GEMINI_FILENAME),
            directory: None,
            sentinels,
        },
        TargetId::Agents => Target {
            id,
            name: "AGENTS.md (Codex and others)",
            single_file: Some(AGENTS_FILENAME),
            directory: None,
            sentinels,
        },
        TargetId::Copilot => Target {
            id,
            name: "GitHub Copilot",
            single_file: Some(COPILOT_FILENAME),
            directory: None,
            sentinels,
        },
        TargetId::Cursor => Target {
            id,
            name: "Cursor",
            single_file: None,
            directory: Some(RulesDir {
                path: CURSOR_RULES_DIR,
                extension: ".mdc",
            }),
            sentinels,
        },
        TargetId::Windsurf => Target {
            id,
            name: "Windsurf",
            single_file: None,
            directory: Some(RulesDir {
                path: WINDSURF_RULES_DIR,
                extension: ".md",
            }),
            sentinels,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_target_has_an_output() {
        for id in TargetId::ALL {
            let t = target(id);
            assert!(t.supports_merge() || t.supports_directory_mode(), "{id}");
        }
    }

    #[test]
    fn test_parse_round_trips() {
        for id in TargetId::ALL {
            assert_eq!(TargetId::parse(id.as_str()), Some(id));
        }
        assert_eq!(TargetId::parse("vim"), None);
    }

    #[test]
    fn test_plan_follows_capabilities() {
        let root = Path::new("/project");

        assert_eq!(
            target(TargetId::Claude).plan(OutputMode::Inline, root),
            OutputPlan::Inline {
                file: root.join("CLAUDE.md")
            }
        );
        assert_eq!(
            target(TargetId::Claude).plan(OutputMode::Directory, root),
            OutputPlan::DirectoryWithReference {
                file: root.join("CLAUDE.md"),
                dir: root.join(".claude/security"),
            }
        );
        assert_eq!(
            target(TargetId::Cursor).plan(OutputMode::Inline, root),
            OutputPlan::Directory {
                dir: root.join(".cursor/rules")
            }
        );
        assert_eq!(
            target(TargetId::Copilot).plan(OutputMode::Directory, root),
            OutputPlan::Inline {
                file: root.join(".github/copilot-instructions.md")
            }
        );
    }

    #[test]
    fn test_rule_file_naming() {
        let dir = target(TargetId::Cursor).directory.unwrap();
        assert_eq!(dir.file_name("ssrf"), "security-ssrf.mdc");
        assert!(dir.is_generated("security-ssrf.mdc"));
        assert!(!dir.is_generated("security-.mdc"));
        assert!(!dir.is_generated("security-ssrf.md"));
        assert!(!dir.is_generated("my-rule.mdc"));
    }
}
