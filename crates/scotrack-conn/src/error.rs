//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors opening a file-backed cmi store.
///
/// Only construction can fail loudly; once a [`crate::FileConnection`]
/// is handed to the gateway, the `LmsConnection` contract is infallible
/// and write failures degrade to `false` plus a log line.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file exists but could not be read.
    #[error("failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a JSON object of string values.
    #[error("store {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
