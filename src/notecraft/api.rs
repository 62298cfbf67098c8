//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every notecraft operation, whatever the UI.
//!
//! It dispatches to `commands/*.rs`, applies configuration (id prefix, policies)
//! and per-call overrides, and returns `Result<CmdResult>`. It never prints and
//! never formats for a terminal.
//!
//! ## Generic Over SequenceStore
//!
//! `NotecraftApi<S: SequenceStore>`:
//! - Production: `NotecraftApi<FileStore>`
//! - Testing: `NotecraftApi<InMemoryStore>`
//!
//! The clock is always passed in, so callers (and tests) decide what "now" is.

use crate::commands;
use crate::config::NotecraftConfig;
use crate::error::Result;
use crate::model::NoteForm;
use crate::segment::BlankLinePolicy;
use crate::store::SequenceStore;
use crate::validation::RowPolicy;
use chrono::{DateTime, Datelike, TimeZone};
use std::path::PathBuf;

/// Per-call policy overrides on top of the stored configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyOverrides {
    pub blank_lines: Option<BlankLinePolicy>,
    pub co_author_policy: Option<RowPolicy>,
}

pub struct NotecraftApi<S: SequenceStore> {
    store: S,
    data_dir: PathBuf,
    config: NotecraftConfig,
}

impl<S: SequenceStore> NotecraftApi<S> {
    pub fn new(store: S, data_dir: PathBuf, config: NotecraftConfig) -> Self {
        Self {
            store,
            data_dir,
            config,
        }
    }

    /// Regenerate: always mints a new id for `category`
    pub fn new_id<D: Datelike>(&mut self, category: &str, now: &D) -> Result<commands::CmdResult> {
        commands::id::issue(&mut self.store, &self.config.id_prefix, category, now, true)
    }

    /// The session id for `category`, minted only when the session has none for
    /// the current bucket
    pub fn current_id<D: Datelike>(
        &mut self,
        category: &str,
        now: &D,
    ) -> Result<commands::CmdResult> {
        commands::id::issue(&mut self.store, &self.config.id_prefix, category, now, false)
    }

    pub fn show_id(&self) -> Result<commands::CmdResult> {
        commands::id::show(&self.store)
    }

    pub fn clear_id(&mut self) -> Result<commands::CmdResult> {
        commands::id::clear(&mut self.store)
    }

    pub fn category_code(&self, category: &str) -> commands::CmdResult {
        commands::id::code(category)
    }

    pub fn categories(&self) -> commands::CmdResult {
        commands::id::categories()
    }

    pub fn counters(&self) -> Result<commands::CmdResult> {
        commands::id::counters(&self.store)
    }

    pub fn segment(
        &self,
        text: &str,
        mode: SegmentMode,
        overrides: PolicyOverrides,
    ) -> commands::CmdResult {
        let policy = overrides.blank_lines.unwrap_or(self.config.blank_lines);
        commands::segment::run(text, mode, policy)
    }

    pub fn compose<Tz: TimeZone>(
        &mut self,
        form: &NoteForm,
        format: OutputFormat,
        overrides: PolicyOverrides,
        now: &DateTime<Tz>,
    ) -> Result<commands::CmdResult>
    where
        Tz::Offset: std::fmt::Display,
    {
        let mut opts = self.config.outline_options();
        if let Some(policy) = overrides.blank_lines {
            opts.blank_lines = policy;
        }
        if let Some(policy) = overrides.co_author_policy {
            opts.co_author_policy = policy;
        }
        commands::compose::run(
            &mut self.store,
            &self.config.id_prefix,
            form,
            &opts,
            now,
            format,
        )
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

pub use crate::commands::compose::OutputFormat;
pub use crate::commands::config::ConfigAction;
pub use crate::commands::segment::SegmentMode;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
