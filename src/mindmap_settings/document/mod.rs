//! # Host Document Layer
//!
//! The editor that owns the markdown text is an external collaborator. This
//! module defines the narrow interface the core needs from it: read a range,
//! replace a range, and resolve a code block to its line boundaries.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryDocument`]: a text buffer with line/character
//!   addressing. Used by tests and as the engine behind the file backend.
//! - [`fs::FileDocument`]: a markdown file loaded into memory and written
//!   back on [`fs::FileDocument::save`].
//!
//! ## Sections
//!
//! Writers never address raw offsets. They name a [`SectionTarget`], which is
//! resolved against the document at write time:
//!
//! ```text
//! # Notes              <- SectionTarget::Document covers every line
//! ```markmap           <- SectionInfo::line_start
//! ---                  <- SectionTarget::CodeBlock covers these lines only
//! markmap:
//!   height: 200
//! ---
//! # Root
//! ```                  <- SectionInfo::line_end
//! ```
//!
//! A stale block reference fails with
//! [`SettingsError::MissingSectionInfo`](crate::error::SettingsError) instead
//! of writing to the wrong lines.

use crate::error::{Result, SettingsError};
use crate::model::BlockId;
use serde::Serialize;
use std::fmt;

pub mod fs;
pub mod memory;

/// Zero-based line and character position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn line_start(line: usize) -> Self {
        Self { line, ch: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.ch)
    }
}

/// Line boundaries of a fenced code block, fences included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionInfo {
    pub line_start: usize,
    pub line_end: usize,
}

/// Abstract interface for the editor buffer holding the markdown text.
pub trait HostDocument {
    /// Text between two positions.
    fn get_range(&self, from: Position, to: Position) -> String;

    /// Replace the text between two positions.
    fn replace_range(&mut self, text: &str, from: Position, to: Position);

    /// Position just past the last character.
    fn end(&self) -> Position;

    /// Line boundaries of a mind-map code block, if it still exists.
    fn section_info(&self, block: BlockId) -> Option<SectionInfo>;

    /// Full document text.
    fn value(&self) -> String {
        self.get_range(Position::default(), self.end())
    }

    /// All mind-map code blocks, in document order.
    fn sections(&self) -> Vec<SectionInfo> {
        (0..)
            .map(BlockId)
            .map_while(|id| self.section_info(id))
            .collect()
    }
}

/// The part of a document a scope's settings are written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTarget {
    /// The whole document; its header holds file-scope settings.
    Document,
    /// The lines strictly inside a code block's fences.
    CodeBlock(BlockId),
}

impl SectionTarget {
    pub fn resolve<D: HostDocument + ?Sized>(&self, doc: &D) -> Result<(Position, Position)> {
        match self {
            SectionTarget::Document => Ok((Position::default(), doc.end())),
            SectionTarget::CodeBlock(id) => {
                let info = doc
                    .section_info(*id)
                    .ok_or(SettingsError::MissingSectionInfo(*id))?;
                Ok((
                    Position::line_start(info.line_start + 1),
                    Position::line_start(info.line_end),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryDocument;
    use super::*;

    #[test]
    fn test_resolve_document() {
        let doc = InMemoryDocument::new("a\nbc");
        let (from, to) = SectionTarget::Document.resolve(&doc).unwrap();
        assert_eq!(from, Position::default());
        assert_eq!(to, Position { line: 1, ch: 2 });
    }

    #[test]
    fn test_resolve_code_block_inner_lines() {
        let doc = InMemoryDocument::new("# T\n\n```markmap\n# Root\n```\n");
        let (from, to) = SectionTarget::CodeBlock(BlockId(0)).resolve(&doc).unwrap();
        assert_eq!(from, Position::line_start(3));
        assert_eq!(to, Position::line_start(4));
        assert_eq!(doc.get_range(from, to), "# Root\n");
    }

    #[test]
    fn test_resolve_missing_block() {
        let doc = InMemoryDocument::new("# nothing\n");
        match SectionTarget::CodeBlock(BlockId(0)).resolve(&doc) {
            Err(SettingsError::MissingSectionInfo(id)) => assert_eq!(id, BlockId(0)),
            other => panic!("Expected MissingSectionInfo, got {:?}", other),
        }
    }

    #[test]
    fn test_sections_lists_blocks_in_order() {
        let doc = InMemoryDocument::new("```markmap\na\n```\n\n```markmap\nb\n```\n");
        let sections = doc.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].line_start, 4);
    }
}
