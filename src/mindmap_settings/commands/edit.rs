use crate::commands::{scope_target, CmdMessage, CmdResult};
use crate::document::{HostDocument, SectionTarget};
use crate::error::Result;
use crate::live::LiveSettings;
use crate::model::{BlockId, Scope, SettingsMap};
use crate::scopes::ScopeStore;
use serde_json::Value;

/// Look up the value that wins for `key`, reporting the scope it came from.
pub fn get<D: HostDocument + ?Sized>(
    doc: &D,
    global: &SettingsMap,
    block: Option<BlockId>,
    key: &str,
) -> Result<CmdResult> {
    let file = LiveSettings::load(Scope::File, SectionTarget::Document, doc)?;
    let block_settings = match block {
        Some(id) => LiveSettings::load(Scope::Block, SectionTarget::CodeBlock(id), doc)?
            .as_map()
            .clone(),
        None => SettingsMap::new(),
    };
    let store = ScopeStore::new(global.clone(), file.as_map().clone(), block_settings);

    match store.get(key) {
        Some((value, scope)) => {
            let mut result = CmdResult::default().with_value(value.clone(), scope);
            result.add_message(CmdMessage::info(format!("(from {} settings)", scope)));
            Ok(result)
        }
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::warning(format!("{} is not set", key)));
            Ok(result)
        }
    }
}

pub fn set<D: HostDocument + ?Sized>(
    doc: &mut D,
    block: Option<BlockId>,
    key: &str,
    value: Value,
) -> Result<CmdResult> {
    let (scope, target) = scope_target(block);
    let mut live = LiveSettings::load(scope, target, doc)?;
    live.set(doc, key, value.clone())?;

    let mut result = CmdResult::default().with_settings(live.as_map().clone());
    result.add_message(CmdMessage::success(format!(
        "{} set to {} in {} settings",
        key, value, scope
    )));
    Ok(result)
}

pub fn unset<D: HostDocument + ?Sized>(
    doc: &mut D,
    block: Option<BlockId>,
    key: &str,
) -> Result<CmdResult> {
    let (scope, target) = scope_target(block);
    let mut live = LiveSettings::load(scope, target, doc)?;
    let removed = live.delete(doc, key)?;

    let mut result = CmdResult::default().with_settings(live.as_map().clone());
    match removed {
        Some(_) => result.add_message(CmdMessage::success(format!(
            "{} removed from {} settings",
            key, scope
        ))),
        None => result.add_message(CmdMessage::info(format!(
            "{} was not set in {} settings",
            key, scope
        ))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::document::memory::fixtures::DocumentFixture;
    use serde_json::json;

    fn global() -> SettingsMap {
        match json!({ "highlight": true, "lineHeight": "1em" }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_get_reports_winning_scope() {
        let doc = DocumentFixture::new()
            .with_file_header("markmap:\n  highlight: false")
            .with_block("---\nmarkmap:\n  lineHeight: 2em\n---\n# Root\n")
            .build();

        let result = get(&doc, &global(), Some(BlockId(0)), "lineHeight").unwrap();
        let found = result.value.unwrap();
        assert_eq!(found.value, json!("2em"));
        assert_eq!(found.scope, Scope::Block);

        let result = get(&doc, &global(), Some(BlockId(0)), "highlight").unwrap();
        assert_eq!(result.value.unwrap().scope, Scope::File);

        let result = get(&doc, &global(), None, "lineHeight").unwrap();
        assert_eq!(result.value.unwrap().scope, Scope::Global);
    }

    #[test]
    fn test_get_missing_key_warns() {
        let doc = DocumentFixture::new().with_block("# Root\n").build();
        let result = get(&doc, &SettingsMap::new(), Some(BlockId(0)), "nope").unwrap();
        assert!(result.value.is_none());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn test_set_block_value() {
        let mut doc = DocumentFixture::new().with_block("# Root\n").build();
        let result = set(&mut doc, Some(BlockId(0)), "highlight", json!(false)).unwrap();
        assert_eq!(
            doc.value(),
            "```markmap\n---\nmarkmap:\n  highlight: false\n---\n# Root\n```\n"
        );
        assert_eq!(
            result.messages[0].content,
            "highlight set to false in codeBlock settings"
        );
    }

    #[test]
    fn test_set_file_value() {
        let mut doc = DocumentFixture::new().with_text("# Notes\n").build();
        set(&mut doc, None, "lockCanvasScroll", json!(false)).unwrap();
        assert_eq!(
            doc.value(),
            "---\nmarkmap:\n  lockCanvasScroll: false\n---\n# Notes\n"
        );
    }

    #[test]
    fn test_unset_reports_whether_key_existed() {
        let mut doc = DocumentFixture::new()
            .with_block("---\nmarkmap:\n  height: 200\n---\n# Root\n")
            .build();

        let result = unset(&mut doc, Some(BlockId(0)), "height").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(doc.value(), "```markmap\n# Root\n```\n");

        let result = unset(&mut doc, Some(BlockId(0)), "height").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }
}
