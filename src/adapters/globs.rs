//! File glob patterns used in rules-file frontmatter.
//!
//! Editors such as Cursor and Windsurf attach a rule to the files matching
//! its globs. The patterns depend on the project's framework and, for a few
//! categories, on the kind of file the rule is about.

const DEPENDENCY_MANIFESTS: &[&str] = &[
    "**/package.json",
    "**/package-lock.json",
    "**/requirements*.txt",
    "**/pyproject.toml",
    "**/Cargo.toml",
];

const CONFIG_FILES: &[&str] = &["**/*.{json,yaml,yml,toml}", "**/.env*", "**/Dockerfile"];

/// Source globs for a framework label. Unknown labels have none.
fn framework_globs(framework: &str) -> &'static [&'static str] {
    match framework {
        "nextjs" => &["**/*.{ts,tsx,js,jsx}", "middleware.{ts,js}"],
        "react" => &["**/*.{ts,tsx,js,jsx}"],
        "vue" => &["**/*.vue", "**/*.{ts,js}"],
        "svelte" => &["**/*.svelte", "**/*.{ts,js}"],
        "angular" => &["**/*.ts", "**/*.html"],
        "express" | "node" => &["**/*.{ts,js}"],
        "django" | "flask" | "fastapi" => &["**/*.py"],
        "vanilla" => &["**/*.{js,ts}", "**/*.html"],
        _ => &[],
    }
}

/// Globs a rule for `category_id` applies to under `framework`.
///
/// An empty result means the rule should always apply.
pub fn globs_for(category_id: &str, framework: &str) -> Vec<&'static str> {
    match category_id {
        "vulnerable-components" => DEPENDENCY_MANIFESTS.to_vec(),
        "insecure-design" => Vec::new(),
        "misconfiguration" => {
            let source = framework_globs(framework);
            if source.is_empty() {
                return Vec::new();
            }
            source.iter().chain(CONFIG_FILES).copied().collect()
        }
        _ => framework_globs(framework).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_globs() {
        assert_eq!(globs_for("injection", "react"), ["**/*.{ts,tsx,js,jsx}"]);
        assert_eq!(globs_for("injection", "django"), ["**/*.py"]);
    }

    #[test]
    fn test_category_overrides() {
        assert!(globs_for("vulnerable-components", "react").contains(&"**/package.json"));
        assert!(globs_for("insecure-design", "react").is_empty());

        let misconfig = globs_for("misconfiguration", "vue");
        assert_eq!(misconfig[0], "**/*.vue");
        assert!(misconfig.contains(&"**/Dockerfile"));
    }

    #[test]
    fn test_unknown_framework_always_applies() {
        assert!(globs_for("injection", "cobol").is_empty());
        assert!(globs_for("misconfiguration", "cobol").is_empty());
    }
}
