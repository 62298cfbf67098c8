//! # Text Segmentation
//!
//! Authors type free-form text into multi-line fields. Renderers need discrete
//! units instead: paragraphs for body sections, one entry per bullet for the key
//! takeaways. This module turns raw text into those units.
//!
//! ## Blank-Line Policies
//!
//! Two contracts coexist and callers pick one explicitly via [`BlankLinePolicy`]:
//!
//! - **Collapse** ("smart" mode): blank-line runs separate paragraphs, single line
//!   breaks inside a paragraph become spaces, empty bullets disappear.
//! - **Preserve**: every physical line survives, including empty ones, which the
//!   renderer must draw as a visible blank line or an empty bullet slot.
//!
//! All functions are pure and return freshly built vectors; nothing is cached.

use serde::{Deserialize, Serialize};

/// How empty lines in free text are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlankLinePolicy {
    #[default]
    Collapse,
    Preserve,
}

impl BlankLinePolicy {
    pub fn preserves(&self) -> bool {
        matches!(self, BlankLinePolicy::Preserve)
    }
}

const BULLET_MARKERS: [char; 3] = ['-', '*', '•'];

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn physical_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    normalize_line_endings(text)
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Splits text into paragraphs on runs of whitespace-only lines. Lines within a
/// paragraph are joined with a single space; each paragraph is trimmed and empty
/// ones are dropped.
pub fn paragraph_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in physical_lines(text) {
        if line.trim().is_empty() {
            flush_block(&mut current, &mut blocks);
        } else {
            current.push(line);
        }
    }
    flush_block(&mut current, &mut blocks);

    blocks
}

fn flush_block(current: &mut Vec<String>, blocks: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let joined = current.join(" ");
    current.clear();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        blocks.push(trimmed.to_string());
    }
}

/// One entry per physical line, empty lines kept in position and nothing trimmed.
pub fn line_preserving_blocks(text: &str) -> Vec<String> {
    physical_lines(text)
}

/// Removes one leading bullet marker (`-`, `*` or `•`, then any whitespace).
/// Only a marker in the very first column counts.
fn strip_bullet_marker(line: &str) -> &str {
    match line.strip_prefix(BULLET_MARKERS) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

/// One entry per line with bullet markers stripped and content trimmed.
/// Under [`BlankLinePolicy::Preserve`] empty lines stay as empty entries.
pub fn bullet_lines(text: &str, policy: BlankLinePolicy) -> Vec<String> {
    physical_lines(text)
        .iter()
        .map(|line| strip_bullet_marker(line).trim().to_string())
        .filter(|line| policy.preserves() || !line.is_empty())
        .collect()
}

/// Body text segmentation under a policy: paragraphs when collapsing, physical
/// lines when preserving.
pub fn body_blocks(text: &str, policy: BlankLinePolicy) -> Vec<String> {
    match policy {
        BlankLinePolicy::Collapse => paragraph_blocks(text),
        BlankLinePolicy::Preserve => line_preserving_blocks(text),
    }
}

/// Rewrites text as clean `- item` bullet markup, one per non-empty line.
pub fn to_bullet_markup(text: &str) -> String {
    bullet_lines(text, BlankLinePolicy::Collapse)
        .iter()
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_join_single_breaks() {
        assert_eq!(
            paragraph_blocks("Hello\nworld\n\nSecond para"),
            vec!["Hello world", "Second para"]
        );
    }

    #[test]
    fn paragraphs_split_on_whitespace_only_runs() {
        let text = "one\r\n \t\r\n\r\n\ntwo\nthree\n   \nfour";
        assert_eq!(paragraph_blocks(text), vec!["one", "two three", "four"]);
    }

    #[test]
    fn paragraphs_trim_and_drop_empties() {
        assert_eq!(paragraph_blocks("\n\n  padded  \n\n\n"), vec!["padded"]);
        assert!(paragraph_blocks("").is_empty());
        assert!(paragraph_blocks(" \n\t\n ").is_empty());
    }

    #[test]
    fn paragraphs_are_restartable() {
        let blocks = paragraph_blocks("a\n\nb");
        let first: Vec<_> = blocks.iter().collect();
        let second: Vec<_> = blocks.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn lone_carriage_returns_count_as_breaks() {
        assert_eq!(paragraph_blocks("a\rb\r\rc"), vec!["a b", "c"]);
    }

    #[test]
    fn line_preserving_keeps_empty_lines() {
        assert_eq!(line_preserving_blocks("A\n\nB"), vec!["A", "", "B"]);
        assert_eq!(
            line_preserving_blocks("  indented\r\n\r\ntail  "),
            vec!["  indented", "", "tail  "]
        );
        assert!(line_preserving_blocks("").is_empty());
    }

    #[test]
    fn bullets_preserving_blank_lines() {
        assert_eq!(
            bullet_lines("- one\ntwo\n\n* three", BlankLinePolicy::Preserve),
            vec!["one", "two", "", "three"]
        );
    }

    #[test]
    fn bullets_collapsing_blank_lines() {
        assert_eq!(
            bullet_lines("- one\n\ntwo", BlankLinePolicy::Collapse),
            vec!["one", "two"]
        );
    }

    #[test]
    fn only_one_leading_marker_is_stripped() {
        assert_eq!(
            bullet_lines("•\tdot\n-- dashes\n*bold*", BlankLinePolicy::Collapse),
            vec!["dot", "- dashes", "bold*"]
        );
    }

    #[test]
    fn indented_marker_is_content() {
        assert_eq!(
            bullet_lines("  - nested", BlankLinePolicy::Collapse),
            vec!["- nested"]
        );
    }

    #[test]
    fn marker_only_line_is_blank() {
        assert_eq!(
            bullet_lines("a\n- \nb", BlankLinePolicy::Preserve),
            vec!["a", "", "b"]
        );
        assert_eq!(
            bullet_lines("a\n- \nb", BlankLinePolicy::Collapse),
            vec!["a", "b"]
        );
    }

    #[test]
    fn body_blocks_follow_policy() {
        let text = "first\nline\n\nsecond";
        assert_eq!(
            body_blocks(text, BlankLinePolicy::Collapse),
            vec!["first line", "second"]
        );
        assert_eq!(
            body_blocks(text, BlankLinePolicy::Preserve),
            vec!["first", "line", "", "second"]
        );
    }

    #[test]
    fn bullet_markup_rewrites_lines() {
        assert_eq!(
            to_bullet_markup("* alpha\n\n  beta\n•gamma"),
            "- alpha\n- beta\n- gamma"
        );
        assert_eq!(to_bullet_markup("\n\n"), "");
    }
}
