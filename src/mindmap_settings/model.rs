use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key under which this crate's settings live inside a document header.
pub const NAMESPACE_KEY: &str = "markmap";

/// Fenced code block language that marks a mind-map block.
pub const CODE_BLOCK_LANGUAGE: &str = "markmap";

/// Height used when neither the block nor a pending drag provides one.
pub const DEFAULT_HEIGHT: f64 = 150.0;

/// Insertion-ordered settings mapping. Unknown keys are carried as-is.
pub type SettingsMap = Map<String, Value>;

/// Where a setting comes from. The derived ordering is the override
/// precedence: a `Block` value beats a `File` value beats a `Global` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    Global,
    File,
    #[serde(rename = "codeBlock")]
    Block,
}

impl Scope {
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::File => "file",
            Scope::Block => "codeBlock",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Zero-based ordinal of a mind-map code block within its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Converts a height or other measure to a JSON number, keeping whole values
/// integral so they serialize as `170` rather than `170.0`.
pub fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Typed view over the recognized keys of a merged settings map.
///
/// Wrong-typed values are not errors here: each field falls back to its
/// default, leaving structural validation to the codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapSettings {
    pub height: f64,
    pub highlight: bool,
    pub lock_canvas_scroll: bool,
    pub default_thickness: String,
    pub depth1_thickness: String,
    pub depth2_thickness: String,
    pub depth3_thickness: String,
    pub line_height: String,
}

impl Default for MindmapSettings {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            highlight: true,
            lock_canvas_scroll: true,
            default_thickness: "1".to_string(),
            depth1_thickness: "1".to_string(),
            depth2_thickness: "1".to_string(),
            depth3_thickness: "1".to_string(),
            line_height: "1em".to_string(),
        }
    }
}

impl MindmapSettings {
    pub fn from_map(map: &SettingsMap) -> Self {
        let d = Self::default();
        Self {
            height: map.get("height").and_then(Value::as_f64).unwrap_or(d.height),
            highlight: flag(map, "highlight").unwrap_or(d.highlight),
            lock_canvas_scroll: flag(map, "lockCanvasScroll").unwrap_or(d.lock_canvas_scroll),
            default_thickness: text(map, "defaultThickness").unwrap_or(d.default_thickness),
            depth1_thickness: text(map, "depth1Thickness").unwrap_or(d.depth1_thickness),
            depth2_thickness: text(map, "depth2Thickness").unwrap_or(d.depth2_thickness),
            depth3_thickness: text(map, "depth3Thickness").unwrap_or(d.depth3_thickness),
            line_height: text(map, "lineHeight").unwrap_or(d.line_height),
        }
    }

    pub fn interaction_options(&self) -> InteractionOptions {
        InteractionOptions::from_lock(self.lock_canvas_scroll)
    }
}

fn flag(map: &SettingsMap, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

// Thickness and line-height are CSS lengths; bare numbers are accepted too.
fn text(map: &SettingsMap, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Canvas interaction switches handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionOptions {
    pub zoom: bool,
    pub pan: bool,
    pub scroll_for_pan: bool,
}

impl InteractionOptions {
    pub fn from_lock(lock_canvas_scroll: bool) -> Self {
        if lock_canvas_scroll {
            Self {
                zoom: false,
                pan: false,
                scroll_for_pan: false,
            }
        } else {
            Self {
                zoom: true,
                pan: true,
                scroll_for_pan: default_scroll_for_pan(),
            }
        }
    }
}

/// Trackpad-first platforms pan on scroll by default.
pub fn default_scroll_for_pan() -> bool {
    cfg!(target_os = "macos")
}
