use crate::document::{HostDocument, SectionTarget};
use crate::error::{Result, SettingsError};
use crate::height::HeightOverride;
use crate::live::LiveSettings;
use crate::model::{BlockId, MindmapSettings, Scope, SettingsMap};
use crate::scopes::{merge, MergedSettings};
use serde_json::Value;
use tracing::debug;

/// Settings state for one rendered code block.
///
/// Owns the live file and block scopes, the injected global scope and the
/// height tracker. Drag deltas stay in memory until [`release`](Self::release);
/// field edits through [`set`](Self::set) and [`delete`](Self::delete) write
/// immediately.
#[derive(Debug, Clone)]
pub struct CodeBlockSession {
    block_id: BlockId,
    global: SettingsMap,
    file: LiveSettings,
    block: LiveSettings,
    height: HeightOverride,
}

impl CodeBlockSession {
    pub fn open<D: HostDocument + ?Sized>(
        doc: &D,
        block_id: BlockId,
        global: SettingsMap,
    ) -> Result<Self> {
        let file = LiveSettings::load(Scope::File, SectionTarget::Document, doc)?;
        let block = LiveSettings::load(Scope::Block, SectionTarget::CodeBlock(block_id), doc)?;
        let height = HeightOverride::from_settings(block.as_map());
        debug!(block = %block_id, height = height.read(), "opened code block session");
        Ok(Self {
            block_id,
            global,
            file,
            block,
            height,
        })
    }

    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    pub fn merged(&self) -> MergedSettings {
        merge(&self.global, self.file.as_map(), self.block.as_map()).with_height(self.height.read())
    }

    pub fn settings(&self) -> MindmapSettings {
        self.merged().typed()
    }

    pub fn set_global(&mut self, global: SettingsMap) {
        self.global = global;
    }

    /// Re-parse the file and block scopes after the document changed.
    /// A pending drag survives unless it now matches the stored height.
    pub fn refresh<D: HostDocument + ?Sized>(&mut self, doc: &D) -> Result<()> {
        let file = LiveSettings::load(Scope::File, SectionTarget::Document, doc)?;
        let block = LiveSettings::load(Scope::Block, SectionTarget::CodeBlock(self.block_id), doc)?;
        self.file.replace(file.as_map().clone());
        self.block.replace(block.as_map().clone());
        self.rebase_height();
        Ok(())
    }

    pub fn height(&self) -> f64 {
        self.height.read()
    }

    pub fn height_state(&self) -> &HeightOverride {
        &self.height
    }

    pub fn drag(&mut self, delta: f64) {
        self.height.adjust(delta);
    }

    pub fn cancel_drag(&mut self) {
        self.height.discard();
    }

    /// End of gesture: persist the pending height, if any.
    pub fn release<D: HostDocument + ?Sized>(&mut self, doc: &mut D) -> Result<Option<f64>> {
        self.height.commit(&mut self.block, doc)
    }

    pub fn file_settings(&self) -> &LiveSettings {
        &self.file
    }

    pub fn block_settings(&self) -> &LiveSettings {
        &self.block
    }

    pub fn set<D: HostDocument + ?Sized>(
        &mut self,
        doc: &mut D,
        scope: Scope,
        key: &str,
        value: Value,
    ) -> Result<()> {
        self.live_mut(scope)?.set(doc, key, value)?;
        self.rebase_height();
        Ok(())
    }

    pub fn delete<D: HostDocument + ?Sized>(
        &mut self,
        doc: &mut D,
        scope: Scope,
        key: &str,
    ) -> Result<Option<Value>> {
        let removed = self.live_mut(scope)?.delete(doc, key)?;
        self.rebase_height();
        Ok(removed)
    }

    fn live_mut(&mut self, scope: Scope) -> Result<&mut LiveSettings> {
        match scope {
            Scope::File => Ok(&mut self.file),
            Scope::Block => Ok(&mut self.block),
            Scope::Global => Err(SettingsError::Api(
                "Global settings are not stored in the document".to_string(),
            )),
        }
    }

    fn rebase_height(&mut self) {
        let persisted = self.block.get("height").and_then(Value::as_f64);
        self.height.rebase(persisted);
    }
}
