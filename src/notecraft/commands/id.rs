use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::sequence::{
    clear_session, current_session, list_counters, map_category_to_code, update_from_category,
    Category, FALLBACK_CODE,
};
use crate::store::SequenceStore;
use chrono::Datelike;

/// Category change / regenerate: mints (or reuses, when `force_new` is false) the
/// session id for `category`. An empty category clears the session.
pub fn issue<S: SequenceStore, D: Datelike>(
    store: &mut S,
    prefix: &str,
    category: &str,
    now: &D,
    force_new: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match update_from_category(store, prefix, category, now, force_new)? {
        Some(id) => {
            if Category::from_name(category).is_none() {
                result.add_message(CmdMessage::warning(format!(
                    "Unknown category '{}', using {}",
                    category.trim(),
                    FALLBACK_CODE
                )));
            }
            Ok(result.with_document_id(id))
        }
        None => {
            result.add_message(CmdMessage::info("No category selected, session id cleared."));
            Ok(result)
        }
    }
}

pub fn show<S: SequenceStore>(store: &S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match current_session(store)? {
        Some(id) => Ok(result.with_document_id(id)),
        None => {
            result.add_message(CmdMessage::info("No session id."));
            Ok(result)
        }
    }
}

pub fn clear<S: SequenceStore>(store: &mut S) -> Result<CmdResult> {
    clear_session(store)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Session id cleared."));
    Ok(result)
}

pub fn code(category: &str) -> CmdResult {
    CmdResult::default().with_lines(vec![map_category_to_code(category).to_string()])
}

/// Every known category as `CODE  Name`
pub fn categories() -> CmdResult {
    let lines = Category::ALL
        .iter()
        .map(|c| format!("{:<6}{}", c.code(), c.name()))
        .collect();
    CmdResult::default().with_lines(lines)
}

pub fn counters<S: SequenceStore>(store: &S) -> Result<CmdResult> {
    let counters = list_counters(store)?;
    let mut result = CmdResult::default();
    if counters.is_empty() {
        result.add_message(CmdMessage::info("No ids issued yet."));
    }
    Ok(result.with_counters(counters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::sequence::SESSION_KEY;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn issue_then_reuse() {
        let mut store = InMemoryStore::new();
        let forced = issue(&mut store, "CRG", "Fixed Income Research", &now(), true).unwrap();
        let reused = issue(&mut store, "CRG", "Fixed Income Research", &now(), false).unwrap();
        assert_eq!(
            forced.document_id.unwrap().to_string(),
            "CRG-FI-2026-10-001"
        );
        assert_eq!(
            reused.document_id.unwrap().to_string(),
            "CRG-FI-2026-10-001"
        );
        assert!(forced.messages.is_empty());
    }

    #[test]
    fn unknown_category_warns() {
        let mut store = InMemoryStore::new();
        let result = issue(&mut store, "CRG", "Crypto", &now(), true).unwrap();
        assert_eq!(result.document_id.as_ref().unwrap().code, "GEN");
        assert!(result.has_warnings());
    }

    #[test]
    fn empty_category_clears() {
        let mut store = InMemoryStore::new();
        issue(&mut store, "CRG", "Macro Research", &now(), true).unwrap();
        let result = issue(&mut store, "CRG", "", &now(), true).unwrap();
        assert!(result.document_id.is_none());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn show_reports_session() {
        let mut store = InMemoryStore::new();
        assert!(show(&store).unwrap().document_id.is_none());
        issue(&mut store, "CRG", "Macro Research", &now(), true).unwrap();
        assert_eq!(show(&store).unwrap().document_id.unwrap().code, "MACRO");
    }

    #[test]
    fn clear_keeps_counters() {
        let mut store = InMemoryStore::new();
        issue(&mut store, "CRG", "Macro Research", &now(), true).unwrap();
        clear(&mut store).unwrap();
        let result = counters(&store).unwrap();
        assert_eq!(result.counters.len(), 1);
        assert_eq!(result.counters[0].value, 1);
    }

    #[test]
    fn code_and_categories() {
        assert_eq!(code("Commodity Insights").lines, vec!["COM"]);
        assert_eq!(code("").lines, vec!["GEN"]);
        let listed = categories().lines;
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[1], "EQ    Equity Research");
    }
}
