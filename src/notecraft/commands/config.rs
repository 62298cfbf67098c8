use crate::commands::{CmdMessage, CmdResult};
use crate::config::NotecraftConfig;
use crate::error::{NotecraftError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Rejected keys and values become error messages; only I/O and parse failures
/// of the config file itself are returned as errors.
pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match action {
        ConfigAction::ShowAll => Ok(result.with_config(NotecraftConfig::load(dir)?)),
        ConfigAction::ShowKey(key) => {
            let message = match NotecraftConfig::load(dir)?.get(&key) {
                Some(value) => CmdMessage::info(value),
                None => CmdMessage::error(format!("Unknown config key: {}", key)),
            };
            result.add_message(message);
            Ok(result)
        }
        ConfigAction::Set(key, value) => match NotecraftConfig::update(dir, &key, &value) {
            Ok(config) => {
                let stored = config.get(&key).unwrap_or(value);
                result.add_message(CmdMessage::success(format!("{} set to {}", key, stored)));
                Ok(result.with_config(config))
            }
            Err(NotecraftError::Validation(reason)) => {
                result.add_message(CmdMessage::error(reason));
                Ok(result)
            }
            Err(e) => Err(e),
        },
    }
}
