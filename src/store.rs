//! Keyed JSON persistence, the server-side stand-in for the browser's
//! per-origin local storage. One file per logical key inside the data
//! directory. No versioning or migration: a value either parses as the
//! current shape or the caller falls back to defaults.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const KEY_TRIPS: &str = "tm_trips";
pub const KEY_EMPLOYEES: &str = "tm_employees";
pub const KEY_SETTINGS: &str = "tm_settings";
pub const KEY_USER: &str = "tm_user";

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// `Ok(None)` when the key has never been written. A present but
    /// malformed value is an error; callers decide whether to fall back.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed stored value under key '{key}'"))?;
        Ok(Some(value))
    }

    /// Write-then-rename so a crash mid-write never leaves a half-written
    /// value under the key.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, raw).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    pub fn clear(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::AppSettings;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_key_loads_as_none() {
        let (_dir, store) = temp_store();
        let loaded: Option<AppSettings> = store.load(KEY_SETTINGS).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = temp_store();
        let mut settings = AppSettings::default();
        settings.company_name = "Initech".to_string();
        store.save(KEY_SETTINGS, &settings).unwrap();

        let loaded: AppSettings = store.load(KEY_SETTINGS).unwrap().unwrap();
        assert_eq!(loaded.company_name, "Initech");
    }

    #[test]
    fn malformed_value_is_an_error_not_a_panic() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("tm_settings.json"), "{not json").unwrap();
        let loaded: anyhow::Result<Option<AppSettings>> = store.load(KEY_SETTINGS);
        assert!(loaded.is_err());
    }

    #[test]
    fn clear_removes_the_key() {
        let (_dir, store) = temp_store();
        store.save(KEY_USER, &serde_json::json!({"id": "admin-1"})).unwrap();
        store.clear(KEY_USER).unwrap();
        let loaded: Option<serde_json::Value> = store.load(KEY_USER).unwrap();
        assert!(loaded.is_none());
    }
}
