use crate::commands::{CmdMessage, CmdResult};
use crate::config::GlobalSettings;
use crate::error::Result;
use crate::model::Scope;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, Value),
    Unset(String),
}

pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = GlobalSettings::load(dir)?;
            Ok(CmdResult::default().with_settings(config.into_map()))
        }
        ConfigAction::ShowKey(key) => {
            let config = GlobalSettings::load(dir)?;
            match config.get(&key) {
                Some(value) => Ok(CmdResult::default().with_value(value.clone(), Scope::Global)),
                None => {
                    let mut result = CmdResult::default();
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)));
                    Ok(result)
                }
            }
        }
        ConfigAction::Set(key, value) => {
            let mut config = GlobalSettings::load(dir)?;
            config.set(&key, value.clone());
            config.save(dir)?;
            let mut result = CmdResult::default().with_settings(config.into_map());
            result.add_message(CmdMessage::success(format!("{} set to {}", key, value)));
            Ok(result)
        }
        ConfigAction::Unset(key) => {
            let mut config = GlobalSettings::load(dir)?;
            let previous = config.unset(&key);
            let mut result = CmdResult::default();
            match (previous, config.get(&key)) {
                (None, _) => {
                    result.add_message(CmdMessage::info(format!("{} was not set", key)));
                }
                (Some(_), Some(default)) => {
                    result.add_message(CmdMessage::success(format!(
                        "{} reset to default {}",
                        key, default
                    )));
                }
                (Some(_), None) => {
                    result.add_message(CmdMessage::success(format!("{} removed", key)));
                }
            }
            config.save(dir)?;
            Ok(result.with_settings(config.into_map()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_show_all_returns_defaults() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.settings.unwrap(), GlobalSettings::defaults());
    }

    #[test]
    fn test_show_key() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("lineHeight".into())).unwrap();
        assert_eq!(result.value.unwrap().value, json!("1em"));

        let result = run(dir.path(), ConfigAction::ShowKey("bogus".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(result.messages[0].content, "Unknown config key: bogus");
    }

    #[test]
    fn test_set_persists() {
        let dir = tempdir().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("lockCanvasScroll".into(), json!(false)),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "lockCanvasScroll set to false");

        let loaded = GlobalSettings::load(dir.path()).unwrap();
        assert_eq!(loaded.get("lockCanvasScroll"), Some(&json!(false)));
    }

    #[test]
    fn test_unset_restores_default() {
        let dir = tempdir().unwrap();
        run(dir.path(), ConfigAction::Set("highlight".into(), json!(false))).unwrap();
        let result = run(dir.path(), ConfigAction::Unset("highlight".into())).unwrap();
        assert_eq!(result.messages[0].content, "highlight reset to default true");

        let loaded = GlobalSettings::load(dir.path()).unwrap();
        assert_eq!(loaded.get("highlight"), Some(&json!(true)));
    }

    #[test]
    fn test_unset_unknown_key() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::Unset("custom".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }
}
