use colored::Colorize;
use notecraft::api::{CmdMessage, MessageLevel};
use notecraft::config::{NotecraftConfig, KEYS};
use notecraft::sequence::{CounterEntry, DocumentId};

fn styled(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", styled(message));
    }
}

/// Same as [`print_messages`] but on stderr, for commands whose stdout is a document.
pub(super) fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", styled(message));
    }
}

pub(super) fn print_document_id(id: Option<&DocumentId>) {
    if let Some(id) = id {
        println!("{}", id);
    }
}

pub(super) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

pub(super) fn format_counter(entry: &CounterEntry) -> String {
    format!(
        "{:<6}{:04}-{:02}  {:>4}",
        entry.code, entry.year, entry.month, entry.value
    )
}

pub(super) fn print_counters(counters: &[CounterEntry]) {
    for entry in counters {
        println!("{}", format_counter(entry));
    }
}

pub(super) fn print_config(config: &NotecraftConfig) {
    for key in KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}
