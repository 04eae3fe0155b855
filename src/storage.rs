//! Local key-value persistence backed by a single JSON file

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// File name inside the data directory
pub const STORAGE_FILE: &str = "storage.json";

/// Keys for the values saved between steps
pub mod keys {
    pub const USER_SITUATION: &str = "userSituation";
    pub const AI_RESULTS: &str = "aiResults";
    pub const SELECTED_PROGRAMS: &str = "selectedPrograms";
    pub const PERSONAL_INFO: &str = "personalInfo";
    pub const INCOME_INFO: &str = "incomeInfo";
    pub const APPLICATION_STATUSES: &str = "applicationStatuses";
    pub const APPLICATION_SUBMISSION: &str = "applicationSubmission";
}

/// String-keyed store of JSON values; every write is flushed to disk
#[derive(Debug, Default)]
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: Map<String, Value>,
}

impl LocalStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable JSON document is discarded with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding unreadable storage file");
                    Map::new()
                }
            }
        } else {
            Map::new()
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "opened storage");
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// Store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open `storage.json` in `dir`, or an in-memory store without a dir
    pub fn open_in(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::open(dir.join(STORAGE_FILE)),
            None => Ok(Self::in_memory()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Typed read; `Ok(None)` when the key is absent
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.entries.get(key) {
            Some(value) => {
                let parsed = serde_json::from_value(value.clone())
                    .with_context(|| format!("decoding stored value for {key}"))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AnalysisResults, Program};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_in_memory_get_set() {
        let mut store = LocalStore::in_memory();
        assert!(store.get::<String>(keys::USER_SITUATION).unwrap().is_none());

        store.set(keys::USER_SITUATION, "rent is due").unwrap();

        assert_eq!(
            store.get::<String>(keys::USER_SITUATION).unwrap(),
            Some("rent is due".to_string())
        );
        assert!(store.path().is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let results = AnalysisResults {
            programs: vec![Program::new(1, "Housing Choice Voucher Program", "d", "e")],
        };
        {
            let mut store = LocalStore::open_in(Some(dir.path())).unwrap();
            store.set(keys::AI_RESULTS, &results).unwrap();
            store.set(keys::SELECTED_PROGRAMS, &vec![1u32]).unwrap();
        }

        let store = LocalStore::open_in(Some(dir.path())).unwrap();

        assert_eq!(
            store.get::<AnalysisResults>(keys::AI_RESULTS).unwrap(),
            Some(results)
        );
        assert_eq!(
            store.get::<Vec<u32>>(keys::SELECTED_PROGRAMS).unwrap(),
            Some(vec![1])
        );
    }

    #[test]
    fn test_file_is_a_json_object_keyed_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::open_in(Some(dir.path())).unwrap();
        store.set(keys::USER_SITUATION, "lost my job").unwrap();

        let raw = fs::read_to_string(dir.path().join(STORAGE_FILE)).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["userSituation"], "lost my job");
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORAGE_FILE), "{not json").unwrap();

        let store = LocalStore::open_in(Some(dir.path())).unwrap();

        assert!(!store.contains(keys::USER_SITUATION));
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let mut store = LocalStore::in_memory();
        store.set(keys::SELECTED_PROGRAMS, "not a list").unwrap();
        assert!(store.get::<Vec<u32>>(keys::SELECTED_PROGRAMS).is_err());
    }
}
