//! Shared constants used across the application.

/// The line that opens the section of a file owned by secrules
pub const REGION_START: &str = "<!-- secrules:start -->";

/// The line that closes the section of a file owned by secrules
pub const REGION_END: &str = "<!-- secrules:end -->";

/// Prefix of every generated per-category rules file
pub const RULE_FILE_PREFIX: &str = "security-";

/// Placeholder in template bodies replaced by the framework label
pub const FRAMEWORK_PLACEHOLDER: &str = "{{framework}}";

/// Framework label used when nothing more specific is known
pub const DEFAULT_FRAMEWORK: &str = "vanilla";

/// The filename for the claude instruction file (uppercase)
pub const CLAUDE_FILENAME: &str = "CLAUDE.md";

/// The filename for the gemini instruction file (uppercase)
pub const GEMINI_FILENAME: &str = "GEMINI.md";

/// The filename for the agents instruction file (uppercase)
pub const AGENTS_FILENAME: &str = "AGENTS.md";

/// The path of the GitHub Copilot instruction file
pub const COPILOT_FILENAME: &str = ".github/copilot-instructions.md";

/// The directory name for claude per-category security files
pub const CLAUDE_RULES_DIR: &str = ".claude/security";

/// The directory name for cursor rules files
pub const CURSOR_RULES_DIR: &str = ".cursor/rules";

/// The directory name for windsurf rules files
pub const WINDSURF_RULES_DIR: &str = ".windsurf/rules";

/// Project-local defaults file, checked before the user-level config
pub const PROJECT_CONFIG_FILENAME: &str = ".secrules.json";

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "SECRULES_LOG";
