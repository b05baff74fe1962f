//! File-backed LMS connection for local development.
//!
//! Persists the cmi map as pretty-printed JSON at a chosen path, so
//! content can run a full connect/track/disconnect session on a
//! developer machine and the resulting state can be inspected (or
//! carried into the next run, exercising the restore paths) without any
//! LMS.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use scotrack_core::gateway::LmsConnection;

use crate::counts::note_indexed_write;
use crate::error::StoreError;

/// An `LmsConnection` backed by a JSON file of `path -> value` strings.
///
/// Reads and writes hit the in-memory map; `save` persists it, and
/// `quit` saves one final time. A missing file opens as an empty store.
pub struct FileConnection {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileConnection {
    /// Open the store at `path`, loading existing state if the file is
    /// there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = values.len(), "opened cmi store");
        Ok(Self { path, values })
    }

    /// Where this store persists.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current in-memory cmi map, sorted by path.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    fn persist(&self) -> bool {
        let json = match serde_json::to_string_pretty(&self.values) {
            Ok(json) => json,
            Err(e) => {
                error!(path = %self.path.display(), "failed to serialize cmi store: {e}");
                return false;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            error!(path = %self.path.display(), "failed to write cmi store: {e}");
            return false;
        }
        true
    }
}

impl LmsConnection for FileConnection {
    fn init(&mut self) -> bool {
        true
    }

    fn get(&mut self, path: &str) -> String {
        self.values.get(path).cloned().unwrap_or_default()
    }

    fn set(&mut self, path: &str, value: &str) -> bool {
        self.values.insert(path.to_string(), value.to_string());
        note_indexed_write(&mut self.values, path);
        true
    }

    fn save(&mut self) -> bool {
        self.persist()
    }

    fn quit(&mut self) -> bool {
        self.persist()
    }
}
