//! # thiri-store: Persistence Layer for Thiri POS
//!
//! This crate persists the Thiri POS ledger. It implements the store
//! contract the engine is written against, `load(key)` and `save(key)`
//! over four logical keys, as one JSON file per key in a data directory,
//! plus the explicit commit boundary that decides WHEN those files are
//! written.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Thiri POS Data Flow                           │
//! │                                                                     │
//! │  Presentation action (save item, checkout, ...)                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  thiri-core Ledger mutation  ──►  marks collections dirty           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  thiri-store (THIS CRATE)                   │   │
//! │  │                                                             │   │
//! │  │   ┌─────────────┐   ┌──────────────┐   ┌───────────────┐   │   │
//! │  │   │ StoreConfig │   │  JsonStore   │   │    session    │   │   │
//! │  │   │  data dir   │   │ load / save  │   │ load + commit │   │   │
//! │  │   └─────────────┘   └──────────────┘   └───────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  <data dir>/pos_items.json, pos_sales_history.json,                 │
//! │             pos_purchase_history.json, pos_settings.json            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store keys, configuration, and the JSON file store
//! - [`session`] - Loading a ledger and committing its dirty collections
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use thiri_store::{session, JsonStore, StoreConfig};
//!
//! let store = JsonStore::open(StoreConfig::from_env()?)?;
//! let mut ledger = session::load_ledger(&store)?;
//!
//! ledger.record_purchase("Green Tea", 12, 8_400)?;
//! session::commit(&store, &mut ledger)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::StoreError;
pub use store::{JsonStore, StoreConfig, StoreKey};
