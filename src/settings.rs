// SPDX-License-Identifier: GPL-3.0-only

//! Persisted user preferences
//!
//! Only the selected effect survives a restart. Read and write failures
//! are logged and otherwise ignored; the booth falls back to defaults.

use crate::constants::EFFECTS;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Serialized preference record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Index into [`EFFECTS`]
    #[serde(rename = "fx")]
    pub effect: usize,
}

/// File-backed settings store
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read stored settings, or `None` if absent or unreadable
    pub fn load(&self) -> Option<Settings> {
        match self.read() {
            Ok(None) => {
                debug!(path = %self.path.display(), "No stored settings");
                None
            }
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Ignoring stored settings");
                None
            }
        }
    }

    /// Write settings; failures are logged and dropped
    pub fn save(&self, settings: &Settings) {
        match self.write(settings) {
            Ok(()) => debug!(path = %self.path.display(), effect = settings.effect, "Settings saved"),
            Err(e) => warn!(error = %e, "Failed to save settings"),
        }
    }

    fn read(&self) -> AppResult<Option<Settings>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Settings(format!(
                    "Cannot read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        let settings: Settings = serde_json::from_str(&text).map_err(|e| {
            AppError::Settings(format!("Corrupt {}: {}", self.path.display(), e))
        })?;
        if settings.effect >= EFFECTS.len() {
            return Err(AppError::Settings(format!(
                "Stored effect {} out of range",
                settings.effect
            )));
        }
        Ok(Some(settings))
    }

    fn write(&self, settings: &Settings) -> AppResult<()> {
        let json =
            serde_json::to_string(settings).map_err(|e| AppError::Settings(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| {
            AppError::Settings(format!("Cannot write {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("photobooth.json"));
        store.save(&Settings { effect: 7 });
        assert_eq!(store.load(), Some(Settings { effect: 7 }));
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            r#"{"fx":7}"#
        );
    }

    #[test]
    fn test_missing_or_corrupt_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("photobooth.json"));
        assert_eq!(store.load(), None);

        std::fs::write(store.path(), "\u{0}garbage").unwrap();
        assert_eq!(store.load(), None);

        std::fs::write(store.path(), r#"{"fx": 99}"#).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_read_errors_are_settings_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("photobooth.json"));
        assert!(matches!(store.read(), Ok(None)));

        std::fs::write(store.path(), r#"{"fx": 17}"#).unwrap();
        assert!(matches!(store.read(), Err(AppError::Settings(_))));

        let store = SettingsStore::new("/nonexistent/dir/photobooth.json");
        assert!(matches!(
            store.write(&Settings::default()),
            Err(AppError::Settings(_))
        ));
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        let store = SettingsStore::new("/nonexistent/dir/photobooth.json");
        store.save(&Settings::default());
    }
}
