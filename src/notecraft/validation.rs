//! Row validation for the repeatable form sections.
//!
//! Co-author rows come in two flavors of strictness, chosen through
//! [`RowPolicy`]. Source rows have a single rule: any filled field makes the
//! row count. Entirely blank rows are never an error, they are skipped.

use crate::model::{CoAuthor, Source};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowPolicy {
    /// A row counts as soon as one field is filled
    #[default]
    AnyField,
    /// Once a row exists, every field is required
    AllFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Blank,
    Invalid { missing: Vec<&'static str> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based row position in the input
    pub row: usize,
    pub missing: Vec<&'static str>,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Co-author {} is missing: {}",
            self.row,
            self.missing.join(", ")
        )
    }
}

pub fn validate_co_author(row: &CoAuthor, policy: RowPolicy) -> ValidationResult {
    if row.is_blank() {
        return ValidationResult::Blank;
    }
    match policy {
        RowPolicy::AnyField => ValidationResult::Valid,
        RowPolicy::AllFields => {
            let missing: Vec<&'static str> = [
                ("last name", &row.last_name),
                ("first name", &row.first_name),
                ("phone", &row.phone),
            ]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label)
            .collect();

            if missing.is_empty() {
                ValidationResult::Valid
            } else {
                ValidationResult::Invalid { missing }
            }
        }
    }
}

pub fn validate_source(row: &Source) -> ValidationResult {
    if row.is_blank() {
        ValidationResult::Blank
    } else {
        ValidationResult::Valid
    }
}

/// Trimmed valid co-authors in input order, plus one error per rejected row.
pub fn collect_co_authors(rows: &[CoAuthor], policy: RowPolicy) -> (Vec<CoAuthor>, Vec<RowError>) {
    let mut accepted = Vec::new();
    let mut errors = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        match validate_co_author(row, policy) {
            ValidationResult::Valid => accepted.push(row.trimmed()),
            ValidationResult::Blank => {}
            ValidationResult::Invalid { missing } => errors.push(RowError {
                row: i + 1,
                missing,
            }),
        }
    }

    (accepted, errors)
}

pub fn collect_sources(rows: &[Source]) -> Vec<Source> {
    rows.iter()
        .filter(|row| validate_source(row) == ValidationResult::Valid)
        .map(Source::trimmed)
        .collect()
}
