//! Per-assistant rendering of security rules.
//!
//! Each supported assistant gets an [`Adapter`] that turns loaded templates
//! into the text that assistant reads: a merged document for an instructions
//! file, a set of per-category files, or a short reference pointing at those
//! files. Adapters are pure; reading and writing files is left to
//! [`crate::generate`].

pub mod globs;
pub mod instructions;
pub mod markdown;
pub mod rules_dir;
pub mod target;

use std::collections::BTreeMap;

use crate::region::{self, RegionError};
use crate::templates::{category, Category, Section};

pub use instructions::{BodyStyle, InstructionsAdapter};
pub use rules_dir::{Frontmatter, RulesDirAdapter};
pub use target::{target, OutputMode, OutputPlan, RulesDir, Target, TargetId};

/// Heading used at the top of every owned region.
const DOCUMENT_TITLE: &str = "# Security Rules";

/// Values every render call needs besides the templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub framework: String,
    pub version: String,
}

impl RenderOptions {
    pub fn new(framework: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            version: version.into(),
        }
    }

    fn version_line(&self) -> String {
        format!("<!-- secrules v{} -->", self.version)
    }
}

/// Rendering capabilities of one assistant.
///
/// Only [`Adapter::target`] is required; the provided methods build the
/// common document shapes and call the hooks ([`Adapter::embed_body`],
/// [`Adapter::frontmatter`]) for per-assistant differences.
pub trait Adapter: Send + Sync {
    /// The target this adapter renders for.
    fn target(&self) -> &Target;

    /// Transforms a rendered template body before it is embedded in a merged
    /// document. Must not fail on bodies of unexpected shape.
    fn embed_body(&self, body: &str) -> String {
        body.trim().to_string()
    }

    /// Metadata block prepended to a per-category file, if the assistant needs one.
    fn frontmatter(&self, _category: &Category, _options: &RenderOptions) -> Option<String> {
        None
    }

    /// Builds the owned region holding every section, wrapped in sentinels.
    fn render_merged(&self, sections: &[Section<'_>], options: &RenderOptions) -> String {
        let mut doc = String::new();
        doc.push_str(&options.version_line());
        doc.push_str("\n\n");
        doc.push_str(DOCUMENT_TITLE);
        doc.push_str("\n\n");
        doc.push_str(&format!(
            "Follow these rules whenever you write or review code in this project (framework: {}).\n",
            options.framework
        ));
        for section in sections {
            let body = self.embed_body(&section.template.render(&options.framework));
            doc.push_str(&format!(
                "\n## {} {}\n",
                section.category.display_code(),
                section.category.title
            ));
            if !body.is_empty() {
                doc.push('\n');
                doc.push_str(&body);
                doc.push('\n');
            }
        }
        self.target().sentinels.wrap(&doc)
    }

    /// Renders one self-contained per-category file.
    fn render_file(&self, section: &Section<'_>, options: &RenderOptions) -> String {
        let body = section.template.render(&options.framework);
        let mut file = String::new();
        if let Some(frontmatter) = self.frontmatter(section.category, options) {
            file.push_str(&frontmatter);
        }
        file.push_str(body.trim());
        file.push('\n');
        file
    }

    /// Renders one file per section, keyed by generated file name. Targets
    /// without a rules directory produce nothing.
    fn render_multiple(
        &self,
        sections: &[Section<'_>],
        options: &RenderOptions,
    ) -> BTreeMap<String, String> {
        let Some(dir) = self.target().directory else {
            return BTreeMap::new();
        };
        sections
            .iter()
            .map(|s| (dir.file_name(s.category.id), self.render_file(s, options)))
            .collect()
    }

    /// Builds a short owned region listing the per-category files instead of
    /// embedding their content.
    fn render_reference(&self, category_ids: &[&str], options: &RenderOptions) -> String {
        let mut doc = String::new();
        doc.push_str(&options.version_line());
        doc.push_str("\n\n");
        doc.push_str(DOCUMENT_TITLE);
        doc.push_str("\n\n");
        if let Some(dir) = self.target().directory {
            doc.push_str(&format!(
                "Security rules for this project (framework: {}) live in `{}/`, one file per category. \
                 Read the matching file before writing or reviewing related code:\n\n",
                options.framework, dir.path
            ));
            for id in category_ids {
                let path = dir.relative_path(id);
                match category(id) {
                    Some(c) => doc.push_str(&format!(
                        "- `{path}`: {} {}\n",
                        c.display_code(),
                        c.title
                    )),
                    None => doc.push_str(&format!("- `{path}`\n")),
                }
            }
        }
        self.target().sentinels.wrap(&doc)
    }

    /// Folds a rendered region into the current content of the target's file.
    fn merge_into_existing(&self, existing: &str, section: &str) -> Result<String, RegionError> {
        region::merge(existing, section, &self.target().sentinels)
    }
}

/// Returns the adapter for a target.
pub fn adapter_for(id: TargetId) -> Box<dyn Adapter> {
    match id {
        TargetId::Claude => Box::new(InstructionsAdapter::new(id, BodyStyle::Full)),
        TargetId::Gemini | TargetId::Agents => {
            Box::new(InstructionsAdapter::new(id, BodyStyle::Untitled))
        }
        TargetId::Copilot => Box::new(InstructionsAdapter::new(id, BodyStyle::RulesOnly)),
        TargetId::Cursor => Box::new(RulesDirAdapter::new(id, Frontmatter::Cursor)),
        TargetId::Windsurf => Box::new(RulesDirAdapter::new(id, Frontmatter::Windsurf)),
    }
}
