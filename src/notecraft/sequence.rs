//! # Document Identifiers
//!
//! Every note gets a human-readable identifier of the form
//!
//! ```text
//! CRG-EQ-2026-03-007
//! │   │  │    │  └── sequence within the bucket, at least 3 digits
//! │   │  │    └───── month, 2 digits
//! │   │  └────────── year
//! │   └───────────── category code
//! └───────────────── organization prefix (configurable)
//! ```
//!
//! ## Buckets and Counters
//!
//! A bucket is a `(code, year, month)` triple. Each bucket owns one counter stored
//! under `seq_<code>_<yyyy>_<mm>`. Counters start implicitly at 0, only ever go
//! up by one, and are never reset or deleted. Buckets never share state, so
//! minting an Equity id in March leaves every other counter untouched.
//!
//! ## Session Reuse
//!
//! While an author edits a single note, the same identifier should keep showing
//! up. The last issued id is remembered under [`SESSION_KEY`]. A non-forced
//! request returns that id as long as it belongs to the bucket of the current
//! category and date; anything else mints a fresh one. A forced request always
//! mints.
//!
//! Sequence numbers are zero padded to three digits but not capped: the 1000th
//! note of a month is `...-1000`.
//!
//! ## Failure Model
//!
//! Bad data never fails: unknown categories fall back to [`FALLBACK_CODE`] and a
//! malformed counter reads as 0. Errors come from the store's own I/O, and from
//! a counter that has run out of range: restarting it would re-issue ids.

use crate::error::{NotecraftError, Result};
use crate::store::SequenceStore;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use tracing::{debug, warn};

pub const SESSION_KEY: &str = "docid_session";
pub const DEFAULT_PREFIX: &str = "CRG";
pub const FALLBACK_CODE: &str = "GEN";

const SEQUENCE_KEY_PREFIX: &str = "seq_";

/// Closed set of note categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    GeneralNote,
    EquityResearch,
    MacroResearch,
    FixedIncomeResearch,
    CommodityInsights,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::GeneralNote,
        Category::EquityResearch,
        Category::MacroResearch,
        Category::FixedIncomeResearch,
        Category::CommodityInsights,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::GeneralNote => "General Note",
            Category::EquityResearch => "Equity Research",
            Category::MacroResearch => "Macro Research",
            Category::FixedIncomeResearch => "Fixed Income Research",
            Category::CommodityInsights => "Commodity Insights",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Category::GeneralNote => "GEN",
            Category::EquityResearch => "EQ",
            Category::MacroResearch => "MACRO",
            Category::FixedIncomeResearch => "FI",
            Category::CommodityInsights => "COM",
        }
    }

    /// Exact (trimmed) display-name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Case-insensitive code lookup (`eq` -> `EquityResearch`).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a category name to its code. Total: anything unrecognized, including
/// the empty string, yields [`FALLBACK_CODE`].
pub fn map_category_to_code(category: &str) -> &'static str {
    Category::from_name(category)
        .map(|c| c.code())
        .unwrap_or(FALLBACK_CODE)
}

/// A parsed document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    pub prefix: String,
    pub code: String,
    pub year: i32,
    pub month: u32,
    pub seq: u64,
}

impl DocumentId {
    /// The `PREFIX-CODE-YYYY-MM-` stem shared by every id in a bucket.
    pub fn bucket_stem(prefix: &str, code: &str, year: i32, month: u32) -> String {
        format!("{}-{}-{:04}-{:02}-", prefix, code, year, month)
    }

    pub fn belongs_to(&self, prefix: &str, code: &str, year: i32, month: u32) -> bool {
        self.prefix == prefix && self.code == code && self.year == year && self.month == month
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:03}",
            Self::bucket_stem(&self.prefix, &self.code, self.year, self.month),
            self.seq
        )
    }
}

impl FromStr for DocumentId {
    type Err = NotecraftError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || NotecraftError::InvalidId(s.to_string());
        let parts: Vec<&str> = s.trim().split('-').collect();
        let [prefix, code, year, month, seq] = parts.as_slice() else {
            return Err(invalid());
        };
        if prefix.is_empty() || code.is_empty() || year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if seq.len() < 3 || !seq.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        let seq: u64 = seq.parse().map_err(|_| invalid())?;

        Ok(DocumentId {
            prefix: prefix.to_string(),
            code: code.to_string(),
            year,
            month,
            seq,
        })
    }
}

/// Store key of the counter for a bucket.
pub fn sequence_key(code: &str, year: i32, month: u32) -> String {
    format!("{}{}_{:04}_{:02}", SEQUENCE_KEY_PREFIX, code, year, month)
}

fn read_counter<S: SequenceStore>(store: &S, key: &str) -> Result<u64> {
    let Some(raw) = store.get(key)? else {
        return Ok(0);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) => Ok(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(NotecraftError::Store(
            format!("sequence counter {} is out of range: {}", key, raw),
        )),
        Err(_) => {
            warn!(key, value = %raw, "malformed sequence counter, treating as 0");
            Ok(0)
        }
    }
}

/// Increments and persists the counter for `(code, year, month)`, returning the
/// new value. A counter that cannot grow any further is a `Store` error, never
/// a repeated number. Not safe against concurrent callers sharing the same store.
pub fn next_sequence<S: SequenceStore>(
    store: &mut S,
    code: &str,
    year: i32,
    month: u32,
) -> Result<u64> {
    let key = sequence_key(code, year, month);
    let next = read_counter(store, &key)?.checked_add(1).ok_or_else(|| {
        NotecraftError::Store(format!("sequence counter {} is exhausted", key))
    })?;
    store.set(&key, &next.to_string())?;
    debug!(key = %key, next, "advanced sequence counter");
    Ok(next)
}

/// Returns the session identifier for the current bucket, minting a new one when
/// there is none, when it belongs to another bucket, or when `force_new` is set.
pub fn generate_identifier<S: SequenceStore, D: Datelike>(
    store: &mut S,
    prefix: &str,
    category: &str,
    now: &D,
    force_new: bool,
) -> Result<DocumentId> {
    let code = map_category_to_code(category);
    let year = now.year();
    let month = now.month();

    if !force_new {
        if let Some(existing) = current_session(store)? {
            if existing.belongs_to(prefix, code, year, month) {
                debug!(id = %existing, "reusing session document id");
                return Ok(existing);
            }
        }
    }

    let seq = next_sequence(store, code, year, month)?;
    let id = DocumentId {
        prefix: prefix.to_string(),
        code: code.to_string(),
        year,
        month,
        seq,
    };
    store.set(SESSION_KEY, &id.to_string())?;
    debug!(id = %id, force_new, "issued document id");
    Ok(id)
}

/// The current session id, if one is stored and well formed.
pub fn current_session<S: SequenceStore>(store: &S) -> Result<Option<DocumentId>> {
    let Some(raw) = store.get(SESSION_KEY)? else {
        return Ok(None);
    };
    match raw.parse::<DocumentId>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            warn!(value = %raw, "ignoring malformed session document id");
            Ok(None)
        }
    }
}

pub fn clear_session<S: SequenceStore>(store: &mut S) -> Result<()> {
    store.remove(SESSION_KEY)
}

/// Category-change handler: an empty selection clears the session, anything else
/// goes through [`generate_identifier`].
pub fn update_from_category<S: SequenceStore, D: Datelike>(
    store: &mut S,
    prefix: &str,
    category: &str,
    now: &D,
    force_new: bool,
) -> Result<Option<DocumentId>> {
    if category.trim().is_empty() {
        clear_session(store)?;
        return Ok(None);
    }
    generate_identifier(store, prefix, category, now, force_new).map(Some)
}

/// A bucket counter as found in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterEntry {
    pub code: String,
    pub year: i32,
    pub month: u32,
    pub value: u64,
}

/// All bucket counters, ordered by key. Keys that do not follow the
/// `seq_<code>_<yyyy>_<mm>` layout are skipped.
pub fn list_counters<S: SequenceStore>(store: &S) -> Result<Vec<CounterEntry>> {
    let mut entries = Vec::new();
    for key in store.keys()? {
        let Some(rest) = key.strip_prefix(SEQUENCE_KEY_PREFIX) else {
            continue;
        };
        let mut parts = rest.rsplitn(3, '_');
        let (Some(month), Some(year), Some(code)) = (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>()) else {
            continue;
        };
        entries.push(CounterEntry {
            code: code.to_string(),
            year,
            month,
            value: read_counter(store, &key)?,
        });
    }
    Ok(entries)
}
