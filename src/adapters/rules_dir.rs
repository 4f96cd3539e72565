//! Adapters for editors that read a directory of rule files.

use super::globs::globs_for;
use super::target::{target, Target, TargetId};
use super::{Adapter, RenderOptions};
use crate::templates::Category;

/// Frontmatter dialect expected by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontmatter {
    /// `.mdc` files with `description`, `globs` and `alwaysApply`.
    Cursor,
    /// `.md` files with a `trigger` of `glob` or `always_on`.
    Windsurf,
}

/// Renders one frontmatter-prefixed file per category.
#[derive(Debug, Clone)]
pub struct RulesDirAdapter {
    target: Target,
    frontmatter: Frontmatter,
}

impl RulesDirAdapter {
    pub fn new(id: TargetId, frontmatter: Frontmatter) -> Self {
        Self {
            target: target(id),
            frontmatter,
        }
    }
}

impl Adapter for RulesDirAdapter {
    fn target(&self) -> &Target {
        &self.target
    }

    fn frontmatter(&self, category: &Category, options: &RenderOptions) -> Option<String> {
        let description = format!(
            "{} {} ({})",
            category.display_code(),
            category.title,
            options.framework
        );
        let globs = globs_for(category.id, &options.framework).join(", ");

        let block = match (self.frontmatter, globs.is_empty()) {
            (Frontmatter::Cursor, true) => {
                format!("---\ndescription: {description}\nglobs:\nalwaysApply: true\n---\n\n")
            }
            (Frontmatter::Cursor, false) => format!(
                "---\ndescription: {description}\nglobs: {globs}\nalwaysApply: false\n---\n\n"
            ),
            (Frontmatter::Windsurf, true) => {
                format!("---\ntrigger: always_on\ndescription: {description}\n---\n\n")
            }
            (Frontmatter::Windsurf, false) => format!(
                "---\ntrigger: glob\ndescription: {description}\nglobs: {globs}\n---\n\n"
            ),
        };
        Some(block)
    }
}
