//! # Document Outline
//!
//! A [`DocumentOutline`] is the renderer-neutral shape of a note: every free-text
//! field already segmented, rows validated, figures and sources numbered. The
//! preview and print renderers only lay it out.
//!
//! Section order is fixed:
//!
//! 1. Key Takeaways (bullets, always present)
//! 2. Analysis and Commentary (always present)
//! 3. Additional Content (only when non-empty)
//! 4. House view (only when non-empty)
//! 5. Figures and Charts, Sources (only when non-empty)
//!
//! Figures are numbered from the position of each image in the form, before any
//! file is touched, so numbering never depends on read order. A figure whose file
//! later fails to load is dropped without renumbering the rest.

use crate::model::{format_date_time, NoteForm, Source};
use crate::segment::{body_blocks, bullet_lines, BlankLinePolicy};
use crate::validation::{collect_co_authors, collect_sources, RowError, RowPolicy};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const PLACEHOLDER: &str = "—";

const TIGHT_SPACING_TWIPS: u32 = 120;
const REGULAR_SPACING_TWIPS: u32 = 200;
const SMALL_CAPTION_HALF_POINTS: u32 = 18;
const REGULAR_CAPTION_HALF_POINTS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineOptions {
    pub organization: String,
    pub house_view_heading: String,
    pub blank_lines: BlankLinePolicy,
    pub co_author_policy: RowPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    /// Empty entries are intentional blank lines (preserve policy)
    pub paragraphs: Vec<String>,
}

impl Section {
    fn new(heading: &str, paragraphs: Vec<String>) -> Self {
        Self {
            heading: heading.to_string(),
            paragraphs,
        }
    }

    pub fn is_empty(&self) -> bool {
        has_no_content(&self.paragraphs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Figure {
    pub number: usize,
    pub caption: String,
    pub path: PathBuf,
    /// The image as a `data:` URI, once it has been read from disk
    pub src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEntry {
    pub number: usize,
    pub name: String,
    pub url: String,
    pub date: String,
    pub line: String,
    /// One-line citation: `name — url — Accessed date | line`
    pub citation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentOutline {
    pub organization: String,
    pub header_line: String,
    pub category: String,
    pub date_time: String,
    pub document_id: Option<String>,
    pub title: String,
    pub topic: String,
    pub primary_author: String,
    pub co_authors: Vec<String>,
    pub takeaways: Vec<String>,
    pub sections: Vec<Section>,
    pub figures: Vec<Figure>,
    pub sources: Vec<SourceEntry>,
    pub blank_lines: BlankLinePolicy,
    /// Space after each paragraph, in twentieths of a point
    pub paragraph_spacing: u32,
    /// Figure caption size, in half points
    pub caption_size: u32,
}

fn has_no_content(entries: &[String]) -> bool {
    entries.iter().all(|entry| entry.trim().is_empty())
}

fn or_placeholder(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Builds the outline. Rejected co-author rows are returned next to it so the
/// caller can report them; they never stop the document from being built.
pub fn build_outline<Tz: TimeZone>(
    form: &NoteForm,
    document_id: Option<&str>,
    generated_at: &DateTime<Tz>,
    opts: &OutlineOptions,
) -> (DocumentOutline, Vec<RowError>)
where
    Tz::Offset: std::fmt::Display,
{
    let date_time = format_date_time(generated_at);
    let category = or_placeholder(form.category());
    let document_id = document_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let mut header_line = format!("{} | {} | {}", opts.organization, category, date_time);
    if let Some(id) = &document_id {
        header_line.push_str(&format!(" | {}", id));
    }

    let primary_author = if form.author.is_blank() {
        PLACEHOLDER.to_string()
    } else {
        form.author.display_line()
    };

    let (co_authors, row_errors) = collect_co_authors(&form.co_authors, opts.co_author_policy);

    let mut sections = vec![Section::new(
        "Analysis and Commentary",
        body_blocks(&form.analysis, opts.blank_lines),
    )];
    for (heading, text) in [
        ("Additional Content", &form.content),
        (opts.house_view_heading.as_str(), &form.house_view),
    ] {
        let section = Section::new(heading, body_blocks(text, opts.blank_lines));
        if !section.is_empty() {
            sections.push(section);
        }
    }

    let mut takeaways = bullet_lines(&form.key_takeaways, opts.blank_lines);
    if has_no_content(&takeaways) {
        takeaways.clear();
    }

    let outline = DocumentOutline {
        organization: opts.organization.clone(),
        header_line,
        category,
        date_time,
        document_id,
        title: or_placeholder(&form.title),
        topic: or_placeholder(&form.topic),
        primary_author,
        co_authors: co_authors.iter().map(|a| a.display_line()).collect(),
        takeaways,
        sections,
        figures: figures(&form.images),
        sources: source_entries(&collect_sources(&form.sources)),
        blank_lines: opts.blank_lines,
        paragraph_spacing: if form.tight_spacing {
            TIGHT_SPACING_TWIPS
        } else {
            REGULAR_SPACING_TWIPS
        },
        caption_size: if form.small_captions {
            SMALL_CAPTION_HALF_POINTS
        } else {
            REGULAR_CAPTION_HALF_POINTS
        },
    };

    (outline, row_errors)
}

/// File name without its last extension (`q3 chart.v2.png` -> `q3 chart.v2`).
fn caption_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => stem.to_string(),
        _ => name,
    }
}

pub fn figures(images: &[PathBuf]) -> Vec<Figure> {
    images
        .iter()
        .enumerate()
        .map(|(i, path)| Figure {
            number: i + 1,
            caption: format!("Figure {}: {}", i + 1, caption_stem(path)),
            path: path.clone(),
            src: None,
        })
        .collect()
}

fn citation(source: &Source) -> String {
    let mut parts = Vec::new();
    if !source.name.is_empty() {
        parts.push(source.name.clone());
    }
    if !source.url.is_empty() {
        parts.push(source.url.clone());
    }
    if !source.date.is_empty() {
        parts.push(format!("Accessed {}", source.date));
    }
    let mut text = parts.join(" — ");
    if !source.line.is_empty() {
        text.push_str(&format!(" | {}", source.line));
    }
    text
}

pub fn source_entries(sources: &[Source]) -> Vec<SourceEntry> {
    sources
        .iter()
        .enumerate()
        .map(|(i, s)| SourceEntry {
            number: i + 1,
            name: s.name.clone(),
            url: s.url.clone(),
            date: s.date.clone(),
            line: s.line.clone(),
            citation: citation(s),
        })
        .collect()
}
