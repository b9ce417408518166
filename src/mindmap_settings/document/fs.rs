use super::memory::InMemoryDocument;
use super::{HostDocument, Position, SectionInfo};
use crate::error::{Result, SettingsError};
use crate::model::BlockId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A markdown file edited in memory and written back on [`save`](Self::save).
pub struct FileDocument {
    path: PathBuf,
    buffer: InMemoryDocument,
    dirty: bool,
}

impl FileDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path).map_err(SettingsError::Io)?;
        debug!(path = %path.display(), bytes = text.len(), "opened document");
        Ok(Self {
            path,
            buffer: InMemoryDocument::new(text),
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the buffer back if it changed. Returns whether a write happened.
    pub fn save(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        fs::write(&self.path, self.buffer.text()).map_err(SettingsError::Io)?;
        self.dirty = false;
        debug!(path = %self.path.display(), "saved document");
        Ok(true)
    }
}

impl HostDocument for FileDocument {
    fn get_range(&self, from: Position, to: Position) -> String {
        self.buffer.get_range(from, to)
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        if self.buffer.get_range(from, to) != text {
            self.buffer.replace_range(text, from, to);
            self.dirty = true;
        }
    }

    fn end(&self) -> Position {
        self.buffer.end()
    }

    fn section_info(&self, block: BlockId) -> Option<SectionInfo> {
        self.buffer.section_info(block)
    }

    fn value(&self) -> String {
        self.buffer.value()
    }

    fn sections(&self) -> Vec<SectionInfo> {
        self.buffer.sections()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        match FileDocument::open(dir.path().join("absent.md")) {
            Err(SettingsError::Io(_)) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_save_only_when_changed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "one\ntwo\n").unwrap();

        let mut doc = FileDocument::open(&path).unwrap();
        doc.replace_range("two\n", Position::line_start(1), Position::line_start(2));
        assert!(!doc.is_dirty());
        assert!(!doc.save().unwrap());

        doc.replace_range("2\n", Position::line_start(1), Position::line_start(2));
        assert!(doc.is_dirty());
        assert!(doc.save().unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\n2\n");
        assert!(!doc.is_dirty());
    }
}
