//! # Persistence Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  std::io::Error / serde_json::Error                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← adds the key/path context               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller surfaces a user-friendly message; the in-memory ledger      │
//! │  is still intact, only the write was lost                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Persistence failures.
///
/// None of these are fatal to the process: the ledger state lives in
/// memory and the caller decides whether to retry the commit or discard.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data directory could not be determined or created.
    #[error("Cannot use data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No data directory could be resolved from the environment or the
    /// platform conventions.
    #[error("Could not determine a data directory; set THIRI_DATA_DIR")]
    NoDataDir,

    /// Reading or writing a key's file failed.
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A key's file holds JSON that doesn't match the expected shape.
    ///
    /// ## When This Occurs
    /// - The file was hand-edited
    /// - A future version changed the schema without migration
    #[error("Corrupt data in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a collection failed (should not happen for our types).
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_path_context() {
        let err = StoreError::Io {
            path: PathBuf::from("/data/pos_items.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("pos_items.json"));
    }
}
