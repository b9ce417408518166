//! # Settings Scopes
//!
//! Settings come from three places, merged in precedence order:
//!
//! 1. **Global**: user preferences, injected by the caller on each pass.
//! 2. **File**: the `markmap` key in the document's header.
//! 3. **Block**: the `markmap` key in the code block's own header.
//!
//! The merge is shallow and type-preserving. A later scope replaces a key
//! wholesale, nested mappings included. Values are not validated; the typed
//! view in [`MindmapSettings`] applies its own defaults.
//!
//! `height` is special. Its effective value comes from a
//! [`HeightOverride`](crate::height::HeightOverride), which layers a pending
//! drag on top of the block's persisted height.

use crate::height::HeightOverride;
use crate::model::{number, MindmapSettings, Scope, SettingsMap};
use serde::Serialize;
use serde_json::Value;
use std::ops::Deref;

/// Effective settings for one rendering pass. Computed, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MergedSettings(SettingsMap);

impl MergedSettings {
    pub fn with_height(mut self, height: f64) -> Self {
        self.0.insert("height".to_string(), number(height));
        self
    }

    pub fn as_map(&self) -> &SettingsMap {
        &self.0
    }

    pub fn into_map(self) -> SettingsMap {
        self.0
    }

    pub fn typed(&self) -> MindmapSettings {
        MindmapSettings::from_map(&self.0)
    }
}

impl Deref for MergedSettings {
    type Target = SettingsMap;

    fn deref(&self) -> &SettingsMap {
        &self.0
    }
}

/// Shallow merge; keys from later scopes win.
pub fn merge(global: &SettingsMap, file: &SettingsMap, block: &SettingsMap) -> MergedSettings {
    let mut merged = global.clone();
    for scope in [file, block] {
        for (key, value) in scope {
            merged.insert(key.clone(), value.clone());
        }
    }
    MergedSettings(merged)
}

/// The three scopes as plain mappings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeStore {
    pub global: SettingsMap,
    pub file: SettingsMap,
    pub block: SettingsMap,
}

impl ScopeStore {
    pub fn new(global: SettingsMap, file: SettingsMap, block: SettingsMap) -> Self {
        Self {
            global,
            file,
            block,
        }
    }

    pub fn scope(&self, scope: Scope) -> &SettingsMap {
        match scope {
            Scope::Global => &self.global,
            Scope::File => &self.file,
            Scope::Block => &self.block,
        }
    }

    pub fn set_scope(&mut self, scope: Scope, settings: SettingsMap) {
        match scope {
            Scope::Global => self.global = settings,
            Scope::File => self.file = settings,
            Scope::Block => self.block = settings,
        }
    }

    /// Naive merge with the tracker's height layered on top.
    pub fn merged(&self, height: &HeightOverride) -> MergedSettings {
        merge(&self.global, &self.file, &self.block).with_height(height.read())
    }

    /// The scope whose value wins for `key`.
    pub fn origin(&self, key: &str) -> Option<Scope> {
        [Scope::Block, Scope::File, Scope::Global]
            .into_iter()
            .find(|scope| self.scope(*scope).contains_key(key))
    }

    pub fn get(&self, key: &str) -> Option<(&Value, Scope)> {
        let scope = self.origin(key)?;
        self.scope(scope).get(key).map(|value| (value, scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> SettingsMap {
        match value {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_merge_precedence() {
        let merged = merge(
            &map(json!({ "a": 1, "b": 2 })),
            &map(json!({ "b": 3, "c": 4 })),
            &map(json!({ "c": 5 })),
        );
        assert_eq!(merged.into_map(), map(json!({ "a": 1, "b": 3, "c": 5 })));
    }

    #[test]
    fn test_merge_is_shallow() {
        let merged = merge(
            &map(json!({ "nested": { "x": 1, "y": 2 } })),
            &map(json!({ "nested": { "x": 9 } })),
            &SettingsMap::new(),
        );
        assert_eq!(merged.get("nested"), Some(&json!({ "x": 9 })));
    }

    #[test]
    fn test_merge_preserves_types() {
        let merged = merge(
            &map(json!({ "height": "not a number" })),
            &SettingsMap::new(),
            &map(json!({ "highlight": "sometimes" })),
        );
        assert_eq!(merged.get("height"), Some(&json!("not a number")));
        assert_eq!(merged.get("highlight"), Some(&json!("sometimes")));
    }

    #[test]
    fn test_merged_height_comes_from_tracker() {
        let store = ScopeStore::new(
            map(json!({ "height": 400 })),
            map(json!({ "height": 300 })),
            map(json!({ "height": 200 })),
        );
        let mut height = HeightOverride::new(Some(200.0));
        height.adjust(15.0);
        assert_eq!(store.merged(&height).get("height"), Some(&json!(215)));
    }

    #[test]
    fn test_merged_height_ignores_file_scope() {
        let store = ScopeStore::new(
            SettingsMap::new(),
            map(json!({ "height": 300 })),
            SettingsMap::new(),
        );
        let height = HeightOverride::new(None);
        assert_eq!(store.merged(&height).get("height"), Some(&json!(150)));
    }

    #[test]
    fn test_origin() {
        let mut store = ScopeStore::default();
        store.set_scope(Scope::Global, map(json!({ "a": 1, "b": 1 })));
        store.set_scope(Scope::File, map(json!({ "b": 2 })));
        assert_eq!(store.origin("a"), Some(Scope::Global));
        assert_eq!(store.get("b"), Some((&json!(2), Scope::File)));
        assert_eq!(store.origin("zzz"), None);
    }
}
