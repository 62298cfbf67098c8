//! # Configuration
//!
//! Stored as `config.json` in the data directory; a missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `id-prefix` | `CRG` | First segment of every document id |
//! | `organization` | `Cordoba Research Group` | Shown in the header line |
//! | `house-view-heading` | `The Cordoba View` | Heading of the closing opinion section |
//! | `blank-lines` | `collapse` | `collapse` or `preserve` |
//! | `co-author-policy` | `any-field` | `any-field` or `all-fields` |
//!
//! Command-line flags override the stored values for a single run.

use crate::error::{NotecraftError, Result};
use crate::outline::OutlineOptions;
use crate::segment::BlankLinePolicy;
use crate::sequence::DEFAULT_PREFIX;
use crate::validation::RowPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ORGANIZATION: &str = "Cordoba Research Group";
const DEFAULT_HOUSE_VIEW_HEADING: &str = "The Cordoba View";

pub const KEYS: [&str; 5] = [
    "id-prefix",
    "organization",
    "house-view-heading",
    "blank-lines",
    "co-author-policy",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotecraftConfig {
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    #[serde(default = "default_organization")]
    pub organization: String,

    #[serde(default = "default_house_view_heading")]
    pub house_view_heading: String,

    #[serde(default)]
    pub blank_lines: BlankLinePolicy,

    #[serde(default)]
    pub co_author_policy: RowPolicy,
}

fn default_id_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_organization() -> String {
    DEFAULT_ORGANIZATION.to_string()
}

fn default_house_view_heading() -> String {
    DEFAULT_HOUSE_VIEW_HEADING.to_string()
}

/// Prefixes end up before the first `-` of an id, so only letters and digits
/// are allowed. Stored uppercase.
fn normalize_prefix(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(NotecraftError::Validation(format!(
            "Invalid id-prefix '{}': use letters and digits only",
            value
        )));
    }
    Ok(value.to_ascii_uppercase())
}

impl Default for NotecraftConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            organization: default_organization(),
            house_view_heading: default_house_view_heading(),
            blank_lines: BlankLinePolicy::default(),
            co_author_policy: RowPolicy::default(),
        }
    }
}

impl NotecraftConfig {
    /// Reads `config.json` from `dir`. A missing file yields the defaults. A
    /// stored prefix that could not appear in a parseable id falls back to the
    /// default with a warning.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(NotecraftError::Io(e)),
        };
        let mut config: NotecraftConfig =
            serde_json::from_str(&content).map_err(NotecraftError::Serialization)?;

        match normalize_prefix(&config.id_prefix) {
            Ok(prefix) => config.id_prefix = prefix,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring stored id-prefix");
                config.id_prefix = default_id_prefix();
            }
        }
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(NotecraftError::Io)?;
        let content = serde_json::to_string_pretty(self).map_err(NotecraftError::Serialization)?;
        fs::write(dir.join(CONFIG_FILENAME), content).map_err(NotecraftError::Io)
    }

    /// Sets one key in the stored config and writes it back. Nothing is written
    /// when the key or value is rejected.
    pub fn update<P: AsRef<Path>>(dir: P, key: &str, value: &str) -> Result<Self> {
        let mut config = Self::load(&dir)?;
        config.set(key, value)?;
        config.save(&dir)?;
        debug!(key, value = ?config.get(key), "updated configuration");
        Ok(config)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "id-prefix" => Some(self.id_prefix.clone()),
            "organization" => Some(self.organization.clone()),
            "house-view-heading" => Some(self.house_view_heading.clone()),
            "blank-lines" => Some(
                match self.blank_lines {
                    BlankLinePolicy::Collapse => "collapse",
                    BlankLinePolicy::Preserve => "preserve",
                }
                .to_string(),
            ),
            "co-author-policy" => Some(
                match self.co_author_policy {
                    RowPolicy::AnyField => "any-field",
                    RowPolicy::AllFields => "all-fields",
                }
                .to_string(),
            ),
            _ => None,
        }
    }

    /// Set a key from its textual form. Bad keys and values are `Validation` errors.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "id-prefix" => self.id_prefix = normalize_prefix(value)?,
            "organization" => self.organization = value.to_string(),
            "house-view-heading" => self.house_view_heading = value.to_string(),
            "blank-lines" => {
                self.blank_lines = match value {
                    "collapse" => BlankLinePolicy::Collapse,
                    "preserve" => BlankLinePolicy::Preserve,
                    other => {
                        return Err(NotecraftError::Validation(format!(
                            "Invalid blank-lines '{}': expected collapse or preserve",
                            other
                        )))
                    }
                }
            }
            "co-author-policy" => {
                self.co_author_policy = match value {
                    "any-field" => RowPolicy::AnyField,
                    "all-fields" => RowPolicy::AllFields,
                    other => {
                        return Err(NotecraftError::Validation(format!(
                            "Invalid co-author-policy '{}': expected any-field or all-fields",
                            other
                        )))
                    }
                }
            }
            other => {
                return Err(NotecraftError::Validation(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }

    pub fn outline_options(&self) -> OutlineOptions {
        OutlineOptions {
            organization: self.organization.clone(),
            house_view_heading: self.house_view_heading.clone(),
            blank_lines: self.blank_lines,
            co_author_policy: self.co_author_policy,
        }
    }
}
