use crate::config::NotecraftConfig;
use crate::sequence::{CounterEntry, DocumentId};

pub mod compose;
pub mod config;
pub mod id;
pub mod segment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub document_id: Option<DocumentId>,
    pub counters: Vec<CounterEntry>,
    /// Line-oriented payload (segment output, category codes)
    pub lines: Vec<String>,
    /// A fully rendered document
    pub rendered: Option<String>,
    pub config: Option<NotecraftConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_document_id(mut self, id: DocumentId) -> Self {
        self.document_id = Some(id);
        self
    }

    pub fn with_counters(mut self, counters: Vec<CounterEntry>) -> Self {
        self.counters = counters;
        self
    }

    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_rendered(mut self, rendered: String) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn with_config(mut self, config: NotecraftConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
