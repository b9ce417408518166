//! # Frontmatter Codec
//!
//! Splits a markdown text into its structured header and the content that
//! follows it, and isolates this crate's settings under [`NAMESPACE_KEY`].
//!
//! A header is a block at the very start of the text, opened by a `---` line
//! and closed by the next `---` line:
//!
//! ```text
//! ---
//! title: Notes
//! markmap:
//!   height: 336
//! ---
//! # Root
//! ```
//!
//! Two decompositions are offered:
//!
//! - [`split_markdown`] answers "what are the settings, and which leading span
//!   of the text holds them". Renderers use it on every pass.
//! - [`FrontmatterDocument`] keeps the whole header mapping and the content
//!   after it, so the writer can rebuild the text without touching the body.
//!
//! The header notation is pluggable through [`HeaderParser`]; [`YamlParser`]
//! is the default. Everything here is pure.

use crate::error::{Result, SettingsError};
use crate::model::{Scope, SettingsMap, NAMESPACE_KEY};
use serde_json::Value;
use std::ops::Range;

const DELIMITER: &str = "---";

/// Parses header source into a JSON-compatible value.
pub trait HeaderParser {
    /// Name used in error messages, e.g. `YAML`.
    fn format_name(&self) -> &'static str;

    /// Parse the raw header text. The error string is surfaced verbatim.
    fn parse(&self, source: &str) -> std::result::Result<Value, String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlParser;

impl HeaderParser for YamlParser {
    fn format_name(&self) -> &'static str {
        "YAML"
    }

    fn parse(&self, source: &str) -> std::result::Result<Value, String> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(source).map_err(|e| e.to_string())?;
        serde_json::to_value(yaml).map_err(|e| e.to_string())
    }
}

/// Location of the header block inside a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterInfo<'a> {
    pub exists: bool,
    /// Header source between the delimiter lines, without the delimiters.
    pub frontmatter: &'a str,
    pub from: usize,
    pub to: usize,
    /// Byte offset where the content after the closing delimiter begins.
    pub content_start: usize,
}

impl FrontmatterInfo<'_> {
    fn absent() -> Self {
        FrontmatterInfo {
            exists: false,
            frontmatter: "",
            from: 0,
            to: 0,
            content_start: 0,
        }
    }
}

pub fn frontmatter_info(text: &str) -> FrontmatterInfo<'_> {
    let first_end = match text.find('\n') {
        Some(i) => i,
        None => return FrontmatterInfo::absent(),
    };
    if text[..first_end].trim_end() != DELIMITER {
        return FrontmatterInfo::absent();
    }

    let from = first_end + 1;
    let mut start = from;
    loop {
        let (line_end, next) = match text[start..].find('\n') {
            Some(i) => (start + i, start + i + 1),
            None => (text.len(), text.len()),
        };
        if text[start..line_end].trim_end() == DELIMITER {
            return FrontmatterInfo {
                exists: true,
                frontmatter: &text[from..start],
                from,
                to: start,
                content_start: next,
            };
        }
        if line_end == text.len() {
            return FrontmatterInfo::absent();
        }
        start = next;
    }
}

/// Result of [`split_markdown`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitMarkdown {
    /// Leading span of the input, up to where the content after the header
    /// starts. Empty when there is no header.
    pub body: String,
    pub settings: SettingsMap,
}

pub fn split_markdown(scope: Scope, text: &str) -> Result<SplitMarkdown> {
    split_markdown_with(&YamlParser, scope, text)
}

pub fn split_markdown_with<P: HeaderParser + ?Sized>(
    parser: &P,
    scope: Scope,
    text: &str,
) -> Result<SplitMarkdown> {
    let info = frontmatter_info(text);
    let header = parse_header(parser, scope, info.frontmatter)?;
    Ok(SplitMarkdown {
        body: text[..info.content_start].to_string(),
        settings: header.as_ref().map(namespace).unwrap_or_default(),
    })
}

/// The settings nested under the reserved key; anything but a mapping there
/// reads as no settings.
pub fn namespace(header: &SettingsMap) -> SettingsMap {
    match header.get(NAMESPACE_KEY) {
        Some(Value::Object(settings)) => settings.clone(),
        _ => SettingsMap::new(),
    }
}

fn parse_header<P: HeaderParser + ?Sized>(
    parser: &P,
    scope: Scope,
    source: &str,
) -> Result<Option<SettingsMap>> {
    if source.is_empty() {
        return Ok(None);
    }
    let invalid = |detail: String| SettingsError::InvalidFrontmatter {
        format: parser.format_name(),
        scope,
        detail,
    };
    match parser.parse(source) {
        Err(detail) => Err(invalid(detail)),
        Ok(Value::Null) => Ok(Some(SettingsMap::new())),
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(other) => Err(invalid(format!(
            "frontmatter must be an object, got {}",
            type_name(&other)
        ))),
    }
}

// A sequence reports as `object`, as user-facing messages always have.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "object",
    }
}

/// A text decomposed into its header mapping and the content after it.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontmatterDocument {
    pub header: Option<SettingsMap>,
    /// The input with the header block removed, byte for byte.
    pub body: String,
    /// Span of the header block (delimiters included) in the input.
    pub header_range: Range<usize>,
}

impl FrontmatterDocument {
    pub fn parse(scope: Scope, text: &str) -> Result<Self> {
        Self::parse_with(&YamlParser, scope, text)
    }

    pub fn parse_with<P: HeaderParser + ?Sized>(
        parser: &P,
        scope: Scope,
        text: &str,
    ) -> Result<Self> {
        let info = frontmatter_info(text);
        let header = parse_header(parser, scope, info.frontmatter)?;
        Ok(Self {
            header,
            body: text[info.content_start..].to_string(),
            header_range: 0..info.content_start,
        })
    }

    pub fn settings(&self) -> SettingsMap {
        self.header.as_ref().map(namespace).unwrap_or_default()
    }

    /// Replace the namespaced settings. An empty mapping removes the key;
    /// other header keys keep their position.
    pub fn set_settings(&mut self, settings: &SettingsMap) {
        let header = self.header.get_or_insert_with(SettingsMap::new);
        if settings.is_empty() {
            header.shift_remove(NAMESPACE_KEY);
        } else {
            header.insert(
                NAMESPACE_KEY.to_string(),
                Value::Object(settings.clone()),
            );
        }
    }

    pub fn to_text(&self) -> Result<String> {
        stringify(self.header.as_ref(), &self.body)
    }
}

/// Emit `body` behind a YAML header. No header block is written for an
/// absent or empty mapping, unless the body itself opens with a `---` block:
/// that one gets an empty header in front so it still reads as body.
/// The body is never altered.
pub fn stringify(header: Option<&SettingsMap>, body: &str) -> Result<String> {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ if frontmatter_info(body).exists => {
            return Ok(format!("{DELIMITER}\n{DELIMITER}\n{body}"));
        }
        _ => return Ok(body.to_string()),
    };
    let mut yaml = serde_yaml::to_string(header)?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}
