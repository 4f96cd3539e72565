//! Adapters for assistants that read a single instructions file.

use super::markdown::{demote_headings, rules_as_bullets, strip_title};
use super::target::{target, Target, TargetId};
use super::Adapter;

/// How much of each template body is embedded in the merged document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// The whole body, title line included.
    Full,
    /// The body without its title line, headings nested under the category heading.
    Untitled,
    /// Only the rules section, flattened into a bullet list.
    RulesOnly,
}

/// Renders rules into an instructions file such as `CLAUDE.md` or
/// `.github/copilot-instructions.md`.
#[derive(Debug, Clone)]
pub struct InstructionsAdapter {
    target: Target,
    style: BodyStyle,
}

impl InstructionsAdapter {
    pub fn new(id: TargetId, style: BodyStyle) -> Self {
        Self {
            target: target(id),
            style,
        }
    }
}

impl Adapter for InstructionsAdapter {
    fn target(&self) -> &Target {
        &self.target
    }

    fn embed_body(&self, body: &str) -> String {
        match self.style {
            BodyStyle::Full => body.trim().to_string(),
            BodyStyle::Untitled => demote_headings(&strip_title(body), 1),
            BodyStyle::RulesOnly => rules_as_bullets(body),
        }
    }
}
