//! # Rendering
//!
//! Two views of a [`DocumentOutline`]:
//!
//! - [`render_preview`]: plain text, for a quick look in the terminal.
//! - [`render_print_html`]: a standalone HTML page meant to be opened in a
//!   browser and printed to PDF.
//!
//! The HTML goes through minijinja with auto-escaping on (the template name ends
//! in `.html`), so every author-supplied string is escaped exactly once. The
//! template lives in `templates/print.html` and is embedded at compile time.
//!
//! Blank entries produced by the preserve policy are drawn as empty bullet
//! slots and empty paragraphs, never collapsed.

use crate::error::Result;
use crate::outline::{DocumentOutline, PLACEHOLDER};
use minijinja::Environment;
use serde::Serialize;

const PRINT_TEMPLATE_NAME: &str = "print.html";
const PRINT_TEMPLATE: &str = include_str!("templates/print.html");

const RULE: &str = "================================";
const BULLET: &str = "•";

#[derive(Serialize)]
struct PrintData<'a> {
    #[serde(flatten)]
    outline: &'a DocumentOutline,
    placeholder: &'static str,
    paragraph_spacing_pt: u32,
    caption_size_pt: u32,
}

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(PRINT_TEMPLATE_NAME, PRINT_TEMPLATE)?;
    Ok(env)
}

pub fn render_print_html(outline: &DocumentOutline) -> Result<String> {
    let env = environment()?;
    let template = env.get_template(PRINT_TEMPLATE_NAME)?;
    let data = PrintData {
        outline,
        placeholder: PLACEHOLDER,
        paragraph_spacing_pt: outline.paragraph_spacing / 20,
        caption_size_pt: outline.caption_size / 2,
    };
    Ok(template.render(data)?)
}

pub fn render_preview(outline: &DocumentOutline) -> String {
    let mut lines: Vec<String> = vec![
        outline.header_line.clone(),
        RULE.to_string(),
        outline.title.clone(),
        format!("TOPIC:      {}", outline.topic),
        format!("PRIMARY:    {}", outline.primary_author),
        format!(
            "DOC ID:     {}",
            outline.document_id.as_deref().unwrap_or(PLACEHOLDER)
        ),
    ];
    if !outline.co_authors.is_empty() {
        lines.push(format!("CO-AUTHORS: {}", outline.co_authors.join(" · ")));
    }

    lines.push(String::new());
    lines.push("KEY TAKEAWAYS".to_string());
    if outline.takeaways.is_empty() {
        lines.push(format!("  {}", PLACEHOLDER));
    }
    for item in &outline.takeaways {
        if item.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("  {} {}", BULLET, item));
        }
    }

    for section in &outline.sections {
        lines.push(String::new());
        lines.push(section.heading.to_uppercase());
        if section.paragraphs.is_empty() {
            lines.push(format!("  {}", PLACEHOLDER));
        }
        for para in &section.paragraphs {
            if para.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("  {}", para));
            }
        }
    }

    if !outline.figures.is_empty() {
        lines.push(String::new());
        lines.push("FIGURES AND CHARTS".to_string());
        for figure in &outline.figures {
            lines.push(format!("  {} {}", BULLET, figure.caption));
        }
    }

    if !outline.sources.is_empty() {
        lines.push(String::new());
        lines.push("SOURCES".to_string());
        for source in &outline.sources {
            lines.push(format!("  {}. {}", source.number, source.citation));
        }
    }

    lines.join("\n")
}
