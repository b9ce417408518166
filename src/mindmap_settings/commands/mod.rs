use crate::document::{SectionInfo, SectionTarget};
use crate::model::{BlockId, Scope, SettingsMap};
use serde::Serialize;
use serde_json::Value;

pub mod blocks;
pub mod config;
pub mod edit;
pub mod resize;
pub mod show;

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

/// One mind-map code block found in a document.
///
/// `settings` is `None` when the block's header failed to parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    pub id: BlockId,
    #[serde(flatten)]
    pub section: SectionInfo,
    pub settings: Option<SettingsMap>,
}

/// A single value together with the scope it was resolved from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopedValue {
    pub value: Value,
    pub scope: Scope,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub settings: Option<SettingsMap>,
    pub value: Option<ScopedValue>,
    pub blocks: Vec<BlockSummary>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_settings(mut self, settings: SettingsMap) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_value(mut self, value: Value, scope: Scope) -> Self {
        self.value = Some(ScopedValue { value, scope });
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<BlockSummary>) -> Self {
        self.blocks = blocks;
        self
    }
}

/// Editing a block goes to that block's header, otherwise to the document's.
pub fn scope_target(block: Option<BlockId>) -> (Scope, SectionTarget) {
    match block {
        Some(id) => (Scope::Block, SectionTarget::CodeBlock(id)),
        None => (Scope::File, SectionTarget::Document),
    }
}

/// Interpret a command-line value as a YAML scalar, so `false` is a boolean
/// and `200` a number. Anything that does not parse is kept as a string.
pub fn parse_value(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::String(raw.to_string());
    }
    serde_yaml::from_str::<serde_yaml::Value>(raw)
        .ok()
        .and_then(|parsed| serde_json::to_value(parsed).ok())
        .filter(|value| !value.is_null() || raw.trim() == "null" || raw.trim() == "~")
        .unwrap_or_else(|| Value::String(raw.to_string()))
}
