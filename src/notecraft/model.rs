use crate::error::{NotecraftError, Result};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
}

impl Person {
    pub fn new(last_name: &str, first_name: &str, phone: &str) -> Self {
        Self {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            phone: phone.to_string(),
        }
    }

    /// Copy with every field trimmed
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.last_name.trim(),
            self.first_name.trim(),
            self.phone.trim(),
        )
    }

    pub fn is_blank(&self) -> bool {
        self.last_name.trim().is_empty()
            && self.first_name.trim().is_empty()
            && self.phone.trim().is_empty()
    }

    /// `LAST, FIRST (phone)` with the phone suffix only when present
    pub fn display_line(&self) -> String {
        let p = self.trimmed();
        let mut line = format!(
            "{}, {}",
            p.last_name.to_uppercase(),
            p.first_name.to_uppercase()
        );
        if !p.phone.is_empty() {
            line.push_str(&format!(" ({})", p.phone));
        }
        line
    }
}

pub type CoAuthor = Person;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub name: String,
    pub url: String,
    pub date: String,
    pub line: String,
}

impl Source {
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            date: self.date.trim().to_string(),
            line: self.line.trim().to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        [&self.name, &self.url, &self.date, &self.line]
            .iter()
            .all(|field| field.trim().is_empty())
    }
}

/// Everything an author fills in for one note, as read from a JSON form file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteForm {
    pub category: String,
    pub title: String,
    pub topic: String,
    pub author: Person,
    pub co_authors: Vec<CoAuthor>,
    pub key_takeaways: String,
    pub analysis: String,
    pub content: String,
    pub house_view: String,
    pub sources: Vec<Source>,
    /// Figure image paths, in the order they should be numbered
    pub images: Vec<PathBuf>,
    /// An identifier to print as-is instead of drawing one from the sequencer
    pub document_id: Option<String>,
    pub tight_spacing: bool,
    pub small_captions: bool,
    /// Directory the form was loaded from; relative image paths resolve against it
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl NoteForm {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(NotecraftError::Io)?;
        let mut form = Self::from_json(&content)?;
        form.base_dir = path.parent().map(Path::to_path_buf);
        Ok(form)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(NotecraftError::Serialization)
    }

    pub fn category(&self) -> &str {
        self.category.trim()
    }

    pub fn fixed_document_id(&self) -> Option<&str> {
        self.document_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// `January 5, 2026 3:07 PM`
pub fn format_date_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%B %-d, %Y %-I:%M %p").to_string()
}
