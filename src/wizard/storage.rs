//! Key-value draft storage on disk
//!
//! Each key is stored as one JSON file below the drafts directory so an
//! unfinished wizard survives a restart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::state::FormData;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Draft is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid draft key \"{0}\"")]
    InvalidKey(String),
}

/// Persisted draft envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDraft {
    pub saved_at: DateTime<Utc>,
    pub data: FormData,
}

#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Load a draft; `None` when nothing was stored under `key`
    pub fn load(&self, key: &str) -> Result<Option<StoredDraft>, StorageError> {
        let path = self.path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let draft: StoredDraft = serde_json::from_str(&content)?;
        Ok(Some(draft))
    }

    /// Store `data` under `key`, replacing any earlier draft
    pub fn save(&self, key: &str, data: &FormData) -> Result<(), StorageError> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.dir)?;
        let draft = StoredDraft {
            saved_at: Utc::now(),
            data: data.clone(),
        };
        let content = serde_json::to_string_pretty(&draft)?;
        // Replace atomically via a sibling temp file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, path = %path.display(), "draft saved");
        Ok(())
    }

    /// Delete a draft; missing drafts are fine
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldValue;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store() -> (TempDir, DraftStore) {
        let dir = TempDir::new().unwrap();
        let store = DraftStore::new(dir.path().join("drafts"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_returns_none() {
        let (_dir, store) = store();
        assert!(store.load("cv_wizard").unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = store();
        let data = FormData::from_iter([
            ("branche", FieldValue::text("it")),
            ("skills", FieldValue::list(["Rust"])),
        ]);
        store.save("cv_wizard", &data).unwrap();

        let draft = store.load("cv_wizard").unwrap().unwrap();
        assert_eq!(draft.data, data);
    }

    #[test]
    fn test_save_overwrites() {
        let (_dir, store) = store();
        store
            .save("cv_wizard", &FormData::from_iter([("a", FieldValue::text("1"))]))
            .unwrap();
        store
            .save("cv_wizard", &FormData::from_iter([("b", FieldValue::text("2"))]))
            .unwrap();
        let draft = store.load("cv_wizard").unwrap().unwrap();
        assert!(draft.data.get("a").is_none());
        assert_eq!(draft.data.text("b"), "2");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = store();
        store.save("cv_wizard", &FormData::new()).unwrap();
        store.remove("cv_wizard").unwrap();
        store.remove("cv_wizard").unwrap();
        assert!(store.load("cv_wizard").unwrap().is_none());
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        let (_dir, store) = store();
        assert!(matches!(
            store.load("../secret"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            store.save("", &FormData::new()),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_corrupt_draft_is_an_error() {
        let (_dir, store) = store();
        let drafts = _dir.path().join("drafts");
        fs::create_dir_all(&drafts).unwrap();
        fs::write(drafts.join("cv_wizard.json"), "{not json").unwrap();
        assert!(matches!(
            store.load("cv_wizard"),
            Err(StorageError::Serde(_))
        ));
    }
}
