//! Structural transforms over template bodies.
//!
//! Template bodies follow a fixed shape (a `# ` title, then `## Rules`,
//! `## Examples` and `## Checklist` sections). These helpers work on that
//! shape by matching heading prefixes line by line rather than parsing
//! markdown, and they never fail: input that does not match the expected
//! shape comes back unchanged (trimmed).

const RULES_HEADING: &str = "## Rules";

fn is_fence(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("```") || line.starts_with("~~~")
}

/// Level of an ATX heading (`#` to `######` followed by a space), if any.
fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        Some(hashes)
    } else {
        None
    }
}

/// Removes the leading `# ` title line and any blank lines after it.
pub fn strip_title(body: &str) -> String {
    let body = body.trim();
    match body.split_once('\n') {
        Some((first, rest)) if heading_level(first) == Some(1) => rest.trim().to_string(),
        None if heading_level(body) == Some(1) => String::new(),
        _ => body.to_string(),
    }
}

/// Pushes every heading outside code fences down by `levels`, capped at `######`.
pub fn demote_headings(body: &str, levels: usize) -> String {
    let mut in_fence = false;
    let mut out = Vec::new();
    for line in body.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
            out.push(line.to_string());
            continue;
        }
        match heading_level(line) {
            Some(level) if !in_fence => {
                let new_level = (level + levels).min(6);
                out.push(format!("{}{}", "#".repeat(new_level), &line[level..]));
            }
            _ => out.push(line.to_string()),
        }
    }
    out.join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Outside,
    InRules,
}

/// Extracts the `## Rules` section as a flat bullet list.
///
/// `### Heading` lines become bold top-level bullets and the bullets beneath
/// them are nested one level. Falls back to the trimmed raw body when the
/// section is missing or empty.
pub fn rules_as_bullets(body: &str) -> String {
    let mut state = Scan::Outside;
    let mut in_fence = false;
    let mut out: Vec<String> = Vec::new();
    let mut nested = false;

    for line in body.lines() {
        match state {
            Scan::Outside => {
                if line.trim_end() == RULES_HEADING {
                    state = Scan::InRules;
                }
            }
            Scan::InRules => {
                if is_fence(line) {
                    in_fence = !in_fence;
                    continue;
                }
                if in_fence {
                    continue;
                }
                match heading_level(line) {
                    Some(level) if level <= 2 => break,
                    Some(_) => {
                        let text = line.trim_start_matches('#').trim();
                        out.push(format!("- **{text}**"));
                        nested = true;
                    }
                    None => {
                        let text = line.trim();
                        if text.is_empty() {
                            continue;
                        }
                        if nested {
                            out.push(format!("  {text}"));
                        } else {
                            out.push(text.to_string());
                        }
                    }
                }
            }
        }
    }

    if out.is_empty() {
        body.trim().to_string()
    } else {
        out.join("\n")
    }
}
