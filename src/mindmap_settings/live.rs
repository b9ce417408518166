use crate::codec::split_markdown;
use crate::document::{HostDocument, SectionTarget};
use crate::error::Result;
use crate::model::{Scope, SettingsMap};
use crate::writer;
use serde_json::Value;
use tracing::debug;

/// A scope's settings with write-through mutation.
///
/// Reads come from the in-memory mapping. `set` and `delete` rewrite the
/// section's header before returning, so a settings surface never needs a
/// separate save step. Each mutation is one full write; nothing is batched.
/// A failed write leaves the mapping as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSettings {
    scope: Scope,
    target: SectionTarget,
    settings: SettingsMap,
}

impl LiveSettings {
    pub fn new(scope: Scope, target: SectionTarget, settings: SettingsMap) -> Self {
        Self {
            scope,
            target,
            settings,
        }
    }

    /// Parse the settings currently stored in the target section.
    pub fn load<D: HostDocument + ?Sized>(
        scope: Scope,
        target: SectionTarget,
        doc: &D,
    ) -> Result<Self> {
        let (from, to) = target.resolve(doc)?;
        let split = split_markdown(scope, &doc.get_range(from, to))?;
        debug!(%scope, keys = split.settings.len(), "loaded settings");
        Ok(Self::new(scope, target, split.settings))
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn target(&self) -> SectionTarget {
        self.target
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.settings.keys()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn as_map(&self) -> &SettingsMap {
        &self.settings
    }

    /// Swap in freshly parsed settings without writing.
    pub fn replace(&mut self, settings: SettingsMap) {
        self.settings = settings;
    }

    pub fn set<D: HostDocument + ?Sized>(
        &mut self,
        doc: &mut D,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        let mut next = self.settings.clone();
        next.insert(key.into(), value.into());
        self.commit(doc, next)
    }

    /// Remove `key` and rewrite the section, whether or not it was present.
    pub fn delete<D: HostDocument + ?Sized>(&mut self, doc: &mut D, key: &str) -> Result<Option<Value>> {
        let mut next = self.settings.clone();
        let removed = next.shift_remove(key);
        self.commit(doc, next)?;
        Ok(removed)
    }

    // The mapping only changes once the write has gone through.
    fn commit<D: HostDocument + ?Sized>(&mut self, doc: &mut D, next: SettingsMap) -> Result<()> {
        writer::write(self.scope, self.target, &next, doc)?;
        self.settings = next;
        Ok(())
    }
}
