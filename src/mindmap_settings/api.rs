//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! settings operations, whatever UI drives them.
//!
//! The facade dispatches to the matching command and normalizes inputs:
//! raw block ordinals become [`BlockId`]s and raw value strings are parsed
//! as YAML scalars. It holds no business logic and performs no terminal I/O.
//!
//! ## Generic Over HostDocument
//!
//! `SettingsApi<D: HostDocument>` works against any editor buffer:
//! - Production: `SettingsApi<FileDocument>`
//! - Testing: `SettingsApi<InMemoryDocument>`
//!
//! The global scope is injected at construction. Use [`config`] to manage
//! the stored global settings themselves.

use crate::commands;
use crate::document::HostDocument;
use crate::error::Result;
use crate::model::{BlockId, SettingsMap};
use std::path::Path;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{
    parse_value, BlockSummary, CmdMessage, CmdResult, MessageLevel, ScopedValue,
};

pub struct SettingsApi<D: HostDocument> {
    document: D,
    global: SettingsMap,
}

impl<D: HostDocument> SettingsApi<D> {
    pub fn new(document: D, global: SettingsMap) -> Self {
        Self { document, global }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn list_blocks(&self) -> Result<CmdResult> {
        commands::blocks::run(&self.document)
    }

    pub fn show(&self, block: Option<usize>) -> Result<CmdResult> {
        commands::show::run(&self.document, &self.global, block.map(BlockId))
    }

    pub fn get(&self, block: Option<usize>, key: &str) -> Result<CmdResult> {
        commands::edit::get(&self.document, &self.global, block.map(BlockId), key)
    }

    pub fn set(&mut self, block: Option<usize>, key: &str, raw_value: &str) -> Result<CmdResult> {
        let value = commands::parse_value(raw_value);
        commands::edit::set(&mut self.document, block.map(BlockId), key, value)
    }

    pub fn unset(&mut self, block: Option<usize>, key: &str) -> Result<CmdResult> {
        commands::edit::unset(&mut self.document, block.map(BlockId), key)
    }

    pub fn resize(&mut self, block: usize, deltas: &[f64]) -> Result<CmdResult> {
        commands::resize::run(&mut self.document, &self.global, BlockId(block), deltas)
    }
}

/// Manage the global settings stored in `dir`.
pub fn config(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    commands::config::run(dir, action)
}
