//! JSON-file preference store.
//!
//! Stores every preference in one JSON object on disk. Writes go to a
//! sibling temp file that is then renamed over the original, so a crash
//! mid-write leaves the previous file intact.

use super::PreferenceStore;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum preferences file size (4MB).
const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Preference store persisted as a single JSON object file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: Map<String, Value>,
}

impl FilePreferences {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is too large, unreadable, or
    /// not a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            read_object(&path)?
        } else {
            Map::new()
        };
        Ok(Self { path, values })
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file with `values`.
    ///
    /// Oversized content is rejected before anything is written, so the
    /// previous file always stays openable.
    fn write(&self, values: &Map<String, Value>) -> Result<()> {
        let json = serde_json::to_vec_pretty(values).map_err(|e| Error::OperationFailed {
            operation: "serialize_preferences".to_string(),
            cause: e.to_string(),
        })?;

        if u64::try_from(json.len()).unwrap_or(u64::MAX) > MAX_FILE_SIZE {
            return Err(Error::InvalidInput(format!(
                "preferences would exceed maximum size of {MAX_FILE_SIZE} bytes ({} bytes): {}",
                json.len(),
                self.path.display()
            )));
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_preferences_dir".to_string(),
                cause: e.to_string(),
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| Error::OperationFailed {
            operation: "write_preferences_file".to_string(),
            cause: e.to_string(),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::OperationFailed {
            operation: "replace_preferences_file".to_string(),
            cause: e.to_string(),
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value);
        self.write(&next)?;
        self.values = next;
        Ok(())
    }
}

fn read_object(path: &Path) -> Result<Map<String, Value>> {
    let metadata = fs::metadata(path).map_err(|e| Error::OperationFailed {
        operation: "read_preferences_metadata".to_string(),
        cause: e.to_string(),
    })?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(Error::InvalidInput(format!(
            "preferences file exceeds maximum size of {MAX_FILE_SIZE} bytes: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::OperationFailed {
        operation: "read_preferences_file".to_string(),
        cause: e.to_string(),
    })?;

    match serde_json::from_str(&contents) {
        Ok(Value::Object(values)) => Ok(values),
        Ok(_) => Err(Error::InvalidInput(format!(
            "preferences file is not a JSON object: {}",
            path.display()
        ))),
        Err(e) => Err(Error::OperationFailed {
            operation: "parse_preferences_file".to_string(),
            cause: e.to_string(),
        }),
    }
}
