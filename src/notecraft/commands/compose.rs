use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::images::embed_figures;
use crate::model::NoteForm;
use crate::outline::{build_outline, OutlineOptions};
use crate::render::{render_preview, render_print_html};
use crate::sequence::update_from_category;
use crate::store::SequenceStore;
use chrono::{DateTime, TimeZone};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Preview,
    PrintHtml,
}

/// Resolves the id to print: a fixed id from the form wins, otherwise the
/// session id for the form's category. A failing store never blocks the
/// document; the id is simply left out.
fn resolve_document_id<S: SequenceStore, Tz: TimeZone>(
    store: &mut S,
    prefix: &str,
    form: &NoteForm,
    now: &DateTime<Tz>,
    result: &mut CmdResult,
) -> Option<String> {
    if let Some(fixed) = form.fixed_document_id() {
        return Some(fixed.to_string());
    }
    match update_from_category(store, prefix, form.category(), now, false) {
        Ok(id) => {
            let text = id.as_ref().map(|id| id.to_string());
            result.document_id = id;
            text
        }
        Err(e) => {
            warn!(error = %e, "document id unavailable, composing without one");
            result.add_message(CmdMessage::warning(format!(
                "Could not assign a document id: {}",
                e
            )));
            None
        }
    }
}

pub fn run<S: SequenceStore, Tz: TimeZone>(
    store: &mut S,
    prefix: &str,
    form: &NoteForm,
    opts: &OutlineOptions,
    now: &DateTime<Tz>,
    format: OutputFormat,
) -> Result<CmdResult>
where
    Tz::Offset: std::fmt::Display,
{
    let mut result = CmdResult::default();
    let document_id = resolve_document_id(store, prefix, form, now, &mut result);

    let (mut outline, row_errors) = build_outline(form, document_id.as_deref(), now, opts);
    for error in &row_errors {
        result.add_message(CmdMessage::warning(error.to_string()));
    }

    let rendered = match format {
        OutputFormat::Preview => render_preview(&outline),
        OutputFormat::PrintHtml => {
            let figures = std::mem::take(&mut outline.figures);
            let (figures, image_errors) = embed_figures(figures, form.base_dir.as_deref());
            for error in &image_errors {
                result.add_message(CmdMessage::warning(error.to_string()));
            }
            outline.figures = figures;
            render_print_html(&outline)?
        }
    };
    Ok(result.with_rendered(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotecraftError;
    use crate::model::{CoAuthor, Person};
    use crate::segment::BlankLinePolicy;
    use crate::store::memory::InMemoryStore;
    use crate::validation::RowPolicy;
    use chrono::Utc;

    /// A store whose every operation fails, standing in for an unreadable file.
    struct BrokenStore;

    impl SequenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(NotecraftError::Store("disk on fire".into()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(NotecraftError::Store("disk on fire".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(NotecraftError::Store("disk on fire".into()))
        }
        fn keys(&self) -> Result<Vec<String>> {
            Err(NotecraftError::Store("disk on fire".into()))
        }
    }

    fn opts(policy: RowPolicy) -> OutlineOptions {
        OutlineOptions {
            organization: "Cordoba Research Group".into(),
            house_view_heading: "The Cordoba View".into(),
            blank_lines: BlankLinePolicy::Collapse,
            co_author_policy: policy,
        }
    }

    fn form() -> NoteForm {
        NoteForm {
            category: "Commodity Insights".into(),
            title: "Oil".into(),
            author: Person::new("Doe", "Jane", "1"),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap()
    }

    fn compose<S: SequenceStore>(
        store: &mut S,
        form: &NoteForm,
        policy: RowPolicy,
        format: OutputFormat,
    ) -> CmdResult {
        run(store, "CRG", form, &opts(policy), &now(), format).unwrap()
    }

    #[test]
    fn compose_assigns_and_reuses_session_id() {
        let mut store = InMemoryStore::new();
        let first = compose(&mut store, &form(), RowPolicy::AnyField, OutputFormat::Preview);
        let second = compose(&mut store, &form(), RowPolicy::AnyField, OutputFormat::Preview);

        assert_eq!(
            first.document_id.as_ref().unwrap().to_string(),
            "CRG-COM-2026-10-001"
        );
        assert_eq!(first.document_id, second.document_id);
        assert!(first
            .rendered
            .unwrap()
            .contains("DOC ID:     CRG-COM-2026-10-001"));
    }

    #[test]
    fn fixed_id_skips_the_sequencer() {
        let mut store = InMemoryStore::new();
        let mut f = form();
        f.document_id = Some("EXT-42".into());
        let result = compose(&mut store, &f, RowPolicy::AnyField, OutputFormat::Preview);
        assert!(result.rendered.unwrap().contains("| EXT-42"));
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn empty_category_composes_without_id() {
        let mut store = InMemoryStore::new();
        let mut f = form();
        f.category = String::new();
        let result = compose(&mut store, &f, RowPolicy::AnyField, OutputFormat::Preview);
        assert!(result.document_id.is_none());
        assert!(result.rendered.unwrap().contains("DOC ID:     —"));
    }

    #[test]
    fn broken_store_does_not_block_document() {
        let mut store = BrokenStore;
        let result = compose(&mut store, &form(), RowPolicy::AnyField, OutputFormat::PrintHtml);
        assert!(result.has_warnings());
        assert!(result.rendered.unwrap().contains("<h1>Oil</h1>"));
    }

    #[test]
    fn print_embeds_figures_relative_to_form() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("charts")).unwrap();
        std::fs::write(dir.path().join("charts/brent.png"), b"png").unwrap();

        let mut store = InMemoryStore::new();
        let mut f = form();
        f.images = vec!["charts/brent.png".into(), "charts/gone.png".into()];
        f.base_dir = Some(dir.path().to_path_buf());
        let result = compose(&mut store, &f, RowPolicy::AnyField, OutputFormat::PrintHtml);

        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0]
            .content
            .starts_with("Figure 2 skipped, could not read"));
        let html = result.rendered.unwrap();
        assert!(html.contains(r#"<img src="data:image&#x2f;png;base64,cG5n""#));
        assert!(html.contains("Figure 1: brent"));
        assert!(!html.contains("Figure 2: gone"));
    }

    #[test]
    fn preview_lists_figures_without_reading_them() {
        let mut store = InMemoryStore::new();
        let mut f = form();
        f.images = vec!["charts/gone.png".into()];
        let result = compose(&mut store, &f, RowPolicy::AnyField, OutputFormat::Preview);
        assert!(result.messages.is_empty());
        assert!(result.rendered.unwrap().contains("Figure 1: gone"));
    }

    #[test]
    fn strict_policy_warns_about_rows() {
        let mut store = InMemoryStore::new();
        let mut f = form();
        f.co_authors = vec![CoAuthor::new("Roe", "", "")];
        let result = compose(&mut store, &f, RowPolicy::AllFields, OutputFormat::Preview);
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.starts_with("Co-author 1"));
        assert!(!result.rendered.unwrap().contains("CO-AUTHORS"));
    }
}
