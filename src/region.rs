//! Owned-region merging.
//!
//! A host file (for example `CLAUDE.md`) may contain user-written content as
//! well as one section delimited by a pair of sentinel lines that this tool
//! owns. Every write replaces that section wholesale and leaves the rest of the
//! file alone, so running the generator repeatedly is idempotent.

use thiserror::Error;

use crate::constants::{REGION_END, REGION_START};

/// The pair of marker lines delimiting an owned region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinels {
    pub start: &'static str,
    pub end: &'static str,
}

impl Sentinels {
    /// Wraps `body` in the sentinel pair, one marker per line.
    pub fn wrap(&self, body: &str) -> String {
        format!("{}\n{}\n{}", self.start, body.trim_end(), self.end)
    }
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            start: REGION_START,
            end: REGION_END,
        }
    }
}

/// Host file problems detected while locating the owned region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// A start sentinel without a matching end sentinel after it.
    #[error("owned region starting at byte {offset} has no end marker")]
    Unterminated { offset: usize },
}

/// Byte span of one owned region, `end` pointing just past the end sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

fn find_region(text: &str, sentinels: &Sentinels) -> Result<Option<Span>, RegionError> {
    let Some(start) = text.find(sentinels.start) else {
        return Ok(None);
    };
    let search_from = start + sentinels.start.len();
    match text[search_from..].find(sentinels.end) {
        Some(rel) => Ok(Some(Span {
            start,
            end: search_from + rel + sentinels.end.len(),
        })),
        None => Err(RegionError::Unterminated { offset: start }),
    }
}

/// Removes every complete owned region from `text`, joining the pieces
/// around each one with a blank line.
fn drop_regions(text: &str, sentinels: &Sentinels) -> Result<String, RegionError> {
    let mut rest = text.to_string();
    while let Some(span) = find_region(&rest, sentinels)? {
        let before = rest[..span.start].trim_end();
        let after = trim_blank_lines_start(&rest[span.end..]);
        rest = join_blocks(before, after);
    }
    Ok(rest)
}

/// Drops leading blank lines but keeps the indentation of the first
/// non-blank line.
fn trim_blank_lines_start(text: &str) -> &str {
    let blank = text.len() - text.trim_start().len();
    match text[..blank].rfind('\n') {
        Some(newline) => &text[newline + 1..],
        None => &text[blank..],
    }
}

fn join_blocks(before: &str, after: &str) -> String {
    match (before.trim().is_empty(), after.trim().is_empty()) {
        (true, _) => after.to_string(),
        (false, true) => before.to_string(),
        (false, false) => format!("{before}\n\n{after}"),
    }
}

/// Folds a freshly rendered owned region into `existing`.
///
/// If `existing` already holds a region it is replaced in place; otherwise the
/// region is appended after a blank line. `region` is expected to begin with
/// the start sentinel and end with the end sentinel.
///
/// # Errors
///
/// Returns [`RegionError::Unterminated`] when `existing` has a start sentinel
/// with no end sentinel after it. The host file is left to the caller.
pub fn merge(existing: &str, region: &str, sentinels: &Sentinels) -> Result<String, RegionError> {
    let region = region.trim_end();

    let Some(span) = find_region(existing, sentinels)? else {
        let head = existing.trim_end();
        if head.is_empty() {
            return Ok(format!("{region}\n"));
        }
        return Ok(format!("{head}\n\n{region}\n"));
    };

    let before = existing[..span.start].trim_end();
    // Collapse stray duplicates so the file ends up with exactly one region.
    let after = drop_regions(&existing[span.end..], sentinels)?;
    let after = after.trim_start();

    let mut merged = String::with_capacity(before.len() + region.len() + after.len() + 3);
    if !before.is_empty() {
        merged.push_str(before);
        merged.push_str("\n\n");
    }
    merged.push_str(region);
    merged.push('\n');
    merged.push_str(after);
    Ok(merged)
}

/// Strips the owned region from `existing`.
///
/// Returns `Ok(None)` when there is no region, otherwise the remaining text
/// (empty when the file held nothing but the region). Non-empty results end
/// with a single newline.
///
/// # Errors
///
/// Returns [`RegionError::Unterminated`] for a start sentinel with no end.
pub fn strip(existing: &str, sentinels: &Sentinels) -> Result<Option<String>, RegionError> {
    if find_region(existing, sentinels)?.is_none() {
        return Ok(None);
    }
    let remaining = drop_regions(existing, sentinels)?;
    let remaining = remaining.trim_end();
    if remaining.trim_start().is_empty() {
        Ok(Some(String::new()))
    } else {
        Ok(Some(format!("{remaining}\n")))
    }
}
