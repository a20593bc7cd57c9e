//! # JSON File Store
//!
//! The durable key-value store behind the ledger: four logical keys, one
//! JSON file each, full-collection overwrites.
//!
//! ## Store Keys
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Key              File                        Value                 │
//! │  ───              ────                        ─────                 │
//! │  Items            pos_items.json              Vec<Item>             │
//! │  SaleHistory      pos_sales_history.json      Vec<SaleRecord>       │
//! │  PurchaseHistory  pos_purchase_history.json   Vec<PurchaseRecord>   │
//! │  Settings         pos_settings.json           Settings              │
//! │                                                                     │
//! │  An absent file is simply "no data yet" (first run), not an error.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Store Key
// =============================================================================

/// The four logical keys the ledger persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Items,
    SaleHistory,
    PurchaseHistory,
    Settings,
}

impl StoreKey {
    /// The file name backing this key.
    pub const fn file_name(&self) -> &'static str {
        match self {
            StoreKey::Items => "pos_items.json",
            StoreKey::SaleHistory => "pos_sales_history.json",
            StoreKey::PurchaseHistory => "pos_purchase_history.json",
            StoreKey::Settings => "pos_settings.json",
        }
    }
}

// =============================================================================
// Store Config
// =============================================================================

/// Where the store keeps its files.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// A config rooted at an explicit directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
        }
    }

    /// Resolves the data directory from the environment.
    ///
    /// ## Resolution Order
    /// 1. `THIRI_DATA_DIR` environment variable (development override)
    /// 2. The platform data directory, e.g.
    ///    - **Linux**: `~/.local/share/thiri-pos`
    ///    - **macOS**: `~/Library/Application Support/com.thiri.pos`
    ///    - **Windows**: `%APPDATA%\thiri\pos\data`
    pub fn from_env() -> StoreResult<Self> {
        if let Ok(dir) = std::env::var("THIRI_DATA_DIR") {
            return Ok(StoreConfig::new(dir));
        }

        let proj_dirs = ProjectDirs::from("com", "thiri", "pos").ok_or(StoreError::NoDataDir)?;
        Ok(StoreConfig::new(proj_dirs.data_dir()))
    }
}

// =============================================================================
// JSON Store
// =============================================================================

/// A JSON file per key under a data directory.
///
/// ## Usage
/// ```rust,ignore
/// let store = JsonStore::open(StoreConfig::from_env()?)?;
///
/// let items: Option<Vec<Item>> = store.load(StoreKey::Items)?;
/// store.save(StoreKey::Items, &items)?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Opens a store, creating the data directory if needed.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.data_dir).map_err(|source| StoreError::DataDir {
            path: config.data_dir.clone(),
            source,
        })?;

        debug!(dir = %config.data_dir.display(), "Opened store");
        Ok(JsonStore {
            data_dir: config.data_dir,
        })
    }

    /// The directory holding the key files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The file path backing a key.
    pub fn path(&self, key: StoreKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }

    /// Loads the value stored under a key.
    ///
    /// Returns `Ok(None)` when the key has never been saved (first run);
    /// a present-but-unreadable file is an error.
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> StoreResult<Option<T>> {
        let path = self.path(key);
        if !path.exists() {
            debug!(key = ?key, "Key absent, nothing to load");
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        let value =
            serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt { path, source })?;

        debug!(key = ?key, bytes = raw.len(), "Loaded key");
        Ok(Some(value))
    }

    /// Saves a value under a key as a full overwrite.
    ///
    /// This is the fire-and-forget durability model: the previous file
    /// contents are replaced wholesale. The caller controls WHEN this
    /// happens via the session commit boundary.
    pub fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> StoreResult<()> {
        let path = self.path(key);
        let raw = serde_json::to_string_pretty(value)?;

        fs::write(&path, raw.as_bytes()).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(key = ?key, bytes = raw.len(), "Saved key");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
