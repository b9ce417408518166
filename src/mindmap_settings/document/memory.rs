use super::{HostDocument, Position, SectionInfo};
use crate::model::{BlockId, CODE_BLOCK_LANGUAGE};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use std::ops::Range;

/// Editor buffer kept entirely in memory.
///
/// Positions are clamped to the text: a line past the end maps to the end of
/// the document and a character past the end of a line maps to its end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryDocument {
    text: String,
}

impl InMemoryDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    fn offset(&self, pos: Position) -> usize {
        let mut line_start = 0;
        for _ in 0..pos.line {
            match self.text[line_start..].find('\n') {
                Some(i) => line_start += i + 1,
                None => return self.text.len(),
            }
        }
        let line_end = self.text[line_start..]
            .find('\n')
            .map_or(self.text.len(), |i| line_start + i);
        self.text[line_start..line_end]
            .char_indices()
            .nth(pos.ch)
            .map_or(line_end, |(i, _)| line_start + i)
    }

    fn span(&self, from: Position, to: Position) -> Range<usize> {
        let (a, b) = (self.offset(from), self.offset(to));
        a.min(b)..a.max(b)
    }

    fn line_of(&self, offset: usize) -> usize {
        self.text[..offset].matches('\n').count()
    }

    /// Closed fenced blocks tagged with the mind-map language.
    fn code_blocks(&self) -> Vec<SectionInfo> {
        Parser::new(&self.text)
            .into_offset_iter()
            .filter_map(|(event, range)| match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                    if info.split_whitespace().next() == Some(CODE_BLOCK_LANGUAGE) =>
                {
                    self.closed_section(range)
                }
                _ => None,
            })
            .collect()
    }

    // Only top-level fences are reported: the opening fence must sit at
    // column 0. Headers are written at column 0, which would break a block
    // out of its list item or blockquote. Unclosed fences run to the end of
    // the document and have no closing line to anchor a write.
    fn closed_section(&self, range: Range<usize>) -> Option<SectionInfo> {
        let opening_line = self.text[..range.start].rfind('\n').map_or(0, |i| i + 1);
        if !self.text[opening_line..].starts_with(['`', '~']) {
            return None;
        }
        let block = self.text[range.clone()].trim_end_matches(['\n', '\r']);
        let (_, last) = block.rsplit_once('\n')?;
        let last = last.trim();
        let fence = last.chars().next()?;
        if !(fence == '`' || fence == '~') || last.chars().any(|c| c != fence) || last.len() < 3 {
            return None;
        }
        let line_start = self.line_of(range.start);
        Some(SectionInfo {
            line_start,
            line_end: line_start + block.matches('\n').count(),
        })
    }
}

impl HostDocument for InMemoryDocument {
    fn get_range(&self, from: Position, to: Position) -> String {
        self.text[self.span(from, to)].to_string()
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        let span = self.span(from, to);
        self.text.replace_range(span, text);
    }

    fn end(&self) -> Position {
        let line = self.text.matches('\n').count();
        let last_line_start = self.text.rfind('\n').map_or(0, |i| i + 1);
        Position {
            line,
            ch: self.text[last_line_start..].chars().count(),
        }
    }

    fn section_info(&self, block: BlockId) -> Option<SectionInfo> {
        self.code_blocks().into_iter().nth(block.0)
    }

    fn value(&self) -> String {
        self.text.clone()
    }

    fn sections(&self) -> Vec<SectionInfo> {
        self.code_blocks()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Builds markdown documents with an optional file header and any number
    /// of mind-map code blocks.
    #[derive(Debug, Default)]
    pub struct DocumentFixture {
        file_header: Option<String>,
        parts: Vec<String>,
    }

    impl DocumentFixture {
        pub fn new() -> Self {
            Self::default()
        }

        /// Raw YAML placed between the file's `---` delimiters.
        pub fn with_file_header(mut self, yaml: &str) -> Self {
            self.file_header = Some(yaml.to_string());
            self
        }

        pub fn with_text(mut self, text: &str) -> Self {
            self.parts.push(text.to_string());
            self
        }

        /// A code block whose inner lines are `inner` (newline-terminated).
        pub fn with_block(mut self, inner: &str) -> Self {
            let mut block = format!("```{}\n{}", CODE_BLOCK_LANGUAGE, inner);
            if !inner.is_empty() && !inner.ends_with('\n') {
                block.push('\n');
            }
            block.push_str("```\n");
            self.parts.push(block);
            self
        }

        pub fn to_text(&self) -> String {
            let mut text = String::new();
            if let Some(header) = &self.file_header {
                text.push_str("---\n");
                text.push_str(header);
                if !header.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str("---\n");
            }
            text.push_str(&self.parts.join("\n"));
            text
        }

        pub fn build(&self) -> InMemoryDocument {
            InMemoryDocument::new(self.to_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::DocumentFixture;
    use super::*;

    #[test]
    fn test_get_range_by_lines() {
        let doc = InMemoryDocument::new("one\ntwo\nthree\n");
        assert_eq!(
            doc.get_range(Position::line_start(1), Position::line_start(2)),
            "two\n"
        );
        assert_eq!(
            doc.get_range(Position { line: 2, ch: 2 }, Position { line: 2, ch: 4 }),
            "re"
        );
    }

    #[test]
    fn test_positions_are_char_based() {
        let doc = InMemoryDocument::new("héllo\n");
        assert_eq!(
            doc.get_range(Position { line: 0, ch: 1 }, Position { line: 0, ch: 3 }),
            "él"
        );
    }

    #[test]
    fn test_out_of_range_positions_clamp() {
        let doc = InMemoryDocument::new("ab\ncd");
        assert_eq!(
            doc.get_range(Position { line: 0, ch: 10 }, Position { line: 9, ch: 0 }),
            "\ncd"
        );
    }

    #[test]
    fn test_reversed_range_is_normalized() {
        let doc = InMemoryDocument::new("abc");
        assert_eq!(
            doc.get_range(Position { line: 0, ch: 2 }, Position { line: 0, ch: 0 }),
            "ab"
        );
    }

    #[test]
    fn test_replace_range() {
        let mut doc = InMemoryDocument::new("one\ntwo\nthree\n");
        doc.replace_range("2\n", Position::line_start(1), Position::line_start(2));
        assert_eq!(doc.text(), "one\n2\nthree\n");
    }

    #[test]
    fn test_end_position() {
        assert_eq!(InMemoryDocument::new("").end(), Position::default());
        assert_eq!(
            InMemoryDocument::new("a\nbcd").end(),
            Position { line: 1, ch: 3 }
        );
        assert_eq!(
            InMemoryDocument::new("a\n").end(),
            Position { line: 1, ch: 0 }
        );
    }

    #[test]
    fn test_finds_only_mindmap_blocks() {
        let doc = DocumentFixture::new()
            .with_text("# Notes\n")
            .with_text("```rust\nfn main() {}\n```\n")
            .with_block("# Root\n## Child\n")
            .build();
        let sections = doc.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].line_start, 6);
        assert_eq!(sections[0].line_end, 9);
    }

    #[test]
    fn test_info_string_with_attributes() {
        let doc = InMemoryDocument::new("~~~markmap title\n# Root\n~~~\n");
        assert_eq!(
            doc.section_info(BlockId(0)),
            Some(SectionInfo {
                line_start: 0,
                line_end: 2
            })
        );
    }

    #[test]
    fn test_unclosed_block_is_not_reported() {
        let doc = InMemoryDocument::new("```markmap\n# Root\n");
        assert!(doc.section_info(BlockId(0)).is_none());
    }

    #[test]
    fn test_nested_blocks_are_not_reported() {
        let doc = InMemoryDocument::new(
            "- item\n\n  ```markmap\n  # Root\n  ```\n\n> ```markmap\n> # Quoted\n> ```\n\n- ```markmap\n  # Inline\n  ```\n\n```markmap\n# Top\n```\n",
        );
        assert_eq!(
            doc.sections(),
            vec![SectionInfo {
                line_start: 14,
                line_end: 16
            }]
        );
    }

    #[test]
    fn test_empty_block() {
        let doc = InMemoryDocument::new("```markmap\n```\n");
        assert_eq!(
            doc.section_info(BlockId(0)),
            Some(SectionInfo {
                line_start: 0,
                line_end: 1
            })
        );
    }

    #[test]
    fn test_fixture_with_file_header() {
        let text = DocumentFixture::new()
            .with_file_header("markmap:\n  highlight: false")
            .with_block("# Root")
            .to_text();
        assert_eq!(
            text,
            "---\nmarkmap:\n  highlight: false\n---\n```markmap\n# Root\n```\n"
        );
    }
}
