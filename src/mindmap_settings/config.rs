//! # Global Settings
//!
//! The global scope is the user's own preferences, shared by every document.
//! It is stored as JSON in `settings.json` inside the config directory:
//!
//! 1. `$MMSET_CONFIG_DIR`, when set.
//! 2. Otherwise the OS config directory (via the `directories` crate).
//!
//! Values in the file are layered over built-in defaults. Keys this crate
//! does not know are kept, so newer settings survive an older binary.
//!
//! | Key | Default |
//! |-----|---------|
//! | `height` | `150` |
//! | `highlight` | `true` |
//! | `lockCanvasScroll` | `true` |
//! | `defaultThickness`, `depth1Thickness`..`depth3Thickness` | `"1"` |
//! | `lineHeight` | `"1em"` |
//!
//! The global scope is never read from ambient state by the core. Callers
//! load it and pass it in on each pass.

use crate::error::{Result, SettingsError};
use crate::model::{number, MindmapSettings, SettingsMap, DEFAULT_HEIGHT};
use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = "settings.json";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "MMSET_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalSettings {
    values: SettingsMap,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            values: Self::defaults(),
        }
    }
}

impl GlobalSettings {
    pub fn defaults() -> SettingsMap {
        let mut values = match serde_json::to_value(MindmapSettings::default()) {
            Ok(Value::Object(map)) => map,
            _ => SettingsMap::new(),
        };
        values.insert("height".to_string(), number(DEFAULT_HEIGHT));
        values
    }

    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        ProjectDirs::from("md", "mindmap-nextgen", "mmset")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| SettingsError::Config("Could not determine config dir".to_string()))
    }

    /// Load from `dir`, or return defaults if no settings file exists.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(SETTINGS_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(SettingsError::Io)?;
        let stored = match serde_json::from_str::<Value>(&content).map_err(SettingsError::Serialization)? {
            Value::Object(map) => map,
            other => {
                return Err(SettingsError::Config(format!(
                    "{} must hold an object, found {}",
                    path.display(),
                    other
                )))
            }
        };

        let mut values = Self::defaults();
        values.extend(stored);
        Ok(Self { values })
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(SettingsError::Io)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(dir.join(SETTINGS_FILENAME), content).map_err(SettingsError::Io)?;
        Ok(())
    }

    pub fn as_map(&self) -> &SettingsMap {
        &self.values
    }

    pub fn into_map(self) -> SettingsMap {
        self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// Drop a user override. Keys with a built-in default fall back to it.
    pub fn unset(&mut self, key: &str) -> Option<Value> {
        match Self::defaults().shift_remove(key) {
            Some(default) => self.values.insert(key.to_string(), default),
            None => self.values.shift_remove(key),
        }
    }
}
