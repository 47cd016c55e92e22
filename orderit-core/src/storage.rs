//! JSON file persistence
//!
//! Every store keeps its whole collection in a single pretty-printed JSON
//! file, rewritten on each mutation. A missing file reads back as the
//! collection's default so a fresh data directory needs no setup step.

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use std::path::{Path, PathBuf};

/// Errors from the JSON file layer
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::Io(_) => ErrorCode::StorageFailure,
            StorageError::Json(_) => ErrorCode::StorageCorrupted,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Handle to a data directory holding one JSON file per collection
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open a store over `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "Opened data directory");
        Ok(Self { dir })
    }

    /// Full path of a data file inside the store
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Whether a data file has been written before
    pub fn exists(&self, name: &str) -> bool {
        self.file_path(name).exists()
    }

    /// Read a collection; a missing file yields the type's default
    pub fn load<T>(&self, name: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.file_path(name);
        if !path.exists() {
            tracing::debug!(file = name, "No data file yet, starting empty");
            return Ok(T::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        let value = serde_json::from_str(&raw)?;
        tracing::debug!(file = name, "Loaded data file");
        Ok(value)
    }

    /// Write a collection as pretty-printed JSON
    pub fn save<T>(&self, name: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(self.file_path(name), json)?;
        tracing::debug!(file = name, "Saved data file");
        Ok(())
    }

    /// Delete a data file if present
    pub fn remove(&self, name: &str) -> Result<(), StorageError> {
        let path = self.file_path(name);
        if path.exists() {
            std::fs::remove_file(path)?;
            tracing::debug!(file = name, "Removed data file");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Row {
        id: String,
        value: i32,
    }

    fn temp_store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("data")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = JsonStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(!store.exists("rows.json"));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let (_dir, store) = temp_store();
        let rows: Vec<Row> = store.load("rows.json").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, store) = temp_store();
        let rows = vec![
            Row { id: "a".into(), value: 1 },
            Row { id: "b".into(), value: 2 },
        ];
        store.save("rows.json", &rows).unwrap();
        assert!(store.exists("rows.json"));

        let loaded: Vec<Row> = store.load("rows.json").unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_save_writes_pretty_json() {
        let (_dir, store) = temp_store();
        store.save("rows.json", &vec![Row { id: "a".into(), value: 1 }]).unwrap();

        let raw = std::fs::read_to_string(store.file_path("rows.json")).unwrap();
        assert!(raw.contains('\n'), "expected pretty-printed output");
    }

    #[test]
    fn test_remove_deletes_file_and_tolerates_absence() {
        let (_dir, store) = temp_store();
        store.save("rows.json", &Vec::<Row>::new()).unwrap();
        store.remove("rows.json").unwrap();
        assert!(!store.exists("rows.json"));

        // Second remove is a no-op
        store.remove("rows.json").unwrap();
    }

    #[test]
    fn test_corrupt_file_surfaces_json_error() {
        let (_dir, store) = temp_store();
        std::fs::write(store.file_path("rows.json"), "{ not json").unwrap();

        let err = store.load::<Vec<Row>>("rows.json").unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));

        let app_err: AppError = err.into();
        assert_eq!(app_err.code, ErrorCode::StorageCorrupted);
    }

    #[test]
    fn test_io_error_maps_to_storage_failure() {
        let err = StorageError::Io(std::io::Error::other("disk gone"));
        let app_err: AppError = err.into();
        assert_eq!(app_err.code, ErrorCode::StorageFailure);
    }
}
