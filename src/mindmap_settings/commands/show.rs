use crate::commands::CmdResult;
use crate::document::{HostDocument, SectionTarget};
use crate::error::Result;
use crate::height::HeightOverride;
use crate::live::LiveSettings;
use crate::model::{BlockId, Scope, SettingsMap};
use crate::scopes::ScopeStore;
use crate::session::CodeBlockSession;

/// Effective settings for a block, or for the document as a whole when no
/// block is given. Document-level output uses the default height.
pub fn run<D: HostDocument + ?Sized>(
    doc: &D,
    global: &SettingsMap,
    block: Option<BlockId>,
) -> Result<CmdResult> {
    let merged = match block {
        Some(id) => CodeBlockSession::open(doc, id, global.clone())?.merged(),
        None => {
            let file = LiveSettings::load(Scope::File, SectionTarget::Document, doc)?;
            ScopeStore::new(global.clone(), file.as_map().clone(), SettingsMap::new())
                .merged(&HeightOverride::default())
        }
    };
    Ok(CmdResult::default().with_settings(merged.into_map()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::memory::fixtures::DocumentFixture;
    use crate::error::SettingsError;
    use serde_json::{json, Value};

    fn map(value: Value) -> SettingsMap {
        match value {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    fn sample() -> crate::document::memory::InMemoryDocument {
        DocumentFixture::new()
            .with_file_header("markmap:\n  highlight: false")
            .with_block("---\nmarkmap:\n  height: 240\n  lineHeight: 2em\n---\n# Root\n")
            .build()
    }

    #[test]
    fn test_block_settings_merge_all_scopes() {
        let doc = sample();
        let global = map(json!({ "highlight": true, "lineHeight": "1em", "lockCanvasScroll": true }));
        let result = run(&doc, &global, Some(BlockId(0))).unwrap();
        assert_eq!(
            result.settings.unwrap(),
            map(json!({
                "highlight": false,
                "lineHeight": "2em",
                "lockCanvasScroll": true,
                "height": 240
            }))
        );
    }

    #[test]
    fn test_document_settings_ignore_blocks() {
        let doc = sample();
        let result = run(&doc, &map(json!({ "lineHeight": "1em" })), None).unwrap();
        let settings = result.settings.unwrap();
        assert_eq!(settings.get("highlight"), Some(&json!(false)));
        assert_eq!(settings.get("lineHeight"), Some(&json!("1em")));
        assert_eq!(settings.get("height"), Some(&json!(150)));
    }

    #[test]
    fn test_unknown_block_is_an_error() {
        let doc = sample();
        assert!(matches!(
            run(&doc, &SettingsMap::new(), Some(BlockId(5))),
            Err(SettingsError::MissingSectionInfo(BlockId(5)))
        ));
    }
}
