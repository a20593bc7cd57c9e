//! # Session: Load and Commit
//!
//! Bridges the pure ledger and the file store.
//!
//! ## The Commit Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Write Discipline                              │
//! │                                                                     │
//! │  startup ──► load_ledger(store) ──► Ledger (cart always empty)      │
//! │                                                                     │
//! │  each user action:                                                  │
//! │    ledger.checkout(rate)?       ← mutates, marks dirty              │
//! │    session::commit(store, &mut ledger)?   ← THE write boundary      │
//! │                                                                     │
//! │  commit persists exactly the dirty collections and only clears      │
//! │  the dirty set once every write succeeded. A crash before commit    │
//! │  loses only the one uncommitted operation, the accepted risk of     │
//! │  this storage model. Upgrading to an atomic multi-file write later  │
//! │  only requires changing this one function.                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use thiri_core::ledger::{DirtySet, Ledger};
use thiri_core::types::Settings;

use crate::error::StoreResult;
use crate::store::{JsonStore, StoreKey};

/// Rebuilds a ledger from the store's three collection keys.
///
/// Absent keys load as empty collections (first run). The cart is
/// transient and always starts empty.
pub fn load_ledger(store: &JsonStore) -> StoreResult<Ledger> {
    let items = store.load(StoreKey::Items)?.unwrap_or_default();
    let sales = store.load(StoreKey::SaleHistory)?.unwrap_or_default();
    let purchases = store.load(StoreKey::PurchaseHistory)?.unwrap_or_default();

    let ledger = Ledger::from_collections(items, sales, purchases);
    debug!(
        items = ledger.items().len(),
        sales = ledger.sales().len(),
        purchases = ledger.purchases().len(),
        "Loaded ledger"
    );
    Ok(ledger)
}

/// Persists the ledger's dirty collections and clears the dirty set.
///
/// Call this after each logical transaction (or batch). Writes are
/// full-collection overwrites; a no-op when nothing is dirty. The dirty
/// set is only cleared after every write succeeded, so a failed commit
/// can simply be retried.
///
/// Returns the set that was persisted.
pub fn commit(store: &JsonStore, ledger: &mut Ledger) -> StoreResult<DirtySet> {
    let dirty = ledger.dirty();
    if !dirty.any() {
        debug!("Nothing dirty, commit is a no-op");
        return Ok(dirty);
    }

    if dirty.items {
        store.save(StoreKey::Items, ledger.items())?;
    }
    if dirty.sales {
        store.save(StoreKey::SaleHistory, ledger.sales())?;
    }
    if dirty.purchases {
        store.save(StoreKey::PurchaseHistory, ledger.purchases())?;
    }

    ledger.take_dirty();
    info!(
        items = dirty.items,
        sales = dirty.sales,
        purchases = dirty.purchases,
        "Committed ledger"
    );
    Ok(dirty)
}

/// Loads settings, falling back to the defaults on first run.
pub fn load_settings(store: &JsonStore) -> StoreResult<Settings> {
    Ok(store.load(StoreKey::Settings)?.unwrap_or_default())
}

/// Persists settings (always a full overwrite of the settings key).
pub fn save_settings(store: &JsonStore, settings: &Settings) -> StoreResult<()> {
    store.save(StoreKey::Settings, settings)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use thiri_core::ledger::SequentialIds;
    use thiri_core::types::{ItemDraft, TaxRate};

    fn temp_store(tag: &str) -> JsonStore {
        let dir = std::env::temp_dir().join(format!(
            "thiri-session-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        JsonStore::open(StoreConfig::new(dir)).unwrap()
    }

    fn test_ledger() -> Ledger {
        Ledger::with_ids(Box::new(SequentialIds::new()))
    }

    #[test]
    fn test_load_from_empty_store() {
        let store = temp_store("empty");
        let ledger = load_ledger(&store).unwrap();

        assert!(ledger.items().is_empty());
        assert!(ledger.sales().is_empty());
        assert!(ledger.purchases().is_empty());
    }

    #[test]
    fn test_commit_then_reload_preserves_state() {
        let store = temp_store("reload");
        let mut ledger = test_ledger();

        let id = ledger
            .create_item(ItemDraft::new("Green Tea", Some(700), 1000, 10))
            .unwrap()
            .id;
        ledger.record_purchase("Green Tea", 5, 3500).unwrap();
        ledger.add_to_cart(id, 1).unwrap();
        ledger.checkout(TaxRate::from_bps(500)).unwrap();

        commit(&store, &mut ledger).unwrap();

        let reloaded = load_ledger(&store).unwrap();
        assert_eq!(reloaded.items(), ledger.items());
        assert_eq!(reloaded.sales(), ledger.sales());
        assert_eq!(reloaded.purchases(), ledger.purchases());
        // The cart never survives a session.
        assert!(reloaded.cart().is_empty());
    }

    #[test]
    fn test_commit_writes_only_dirty_collections() {
        let store = temp_store("dirty-only");
        let mut ledger = test_ledger();

        ledger
            .create_item(ItemDraft::new("Green Tea", Some(700), 1000, 10))
            .unwrap();
        let persisted = commit(&store, &mut ledger).unwrap();

        assert!(persisted.items);
        assert!(!persisted.sales);
        assert!(store.path(StoreKey::Items).exists());
        // Untouched collections were never written.
        assert!(!store.path(StoreKey::SaleHistory).exists());
        assert!(!store.path(StoreKey::PurchaseHistory).exists());
    }

    #[test]
    fn test_commit_clears_dirty_set() {
        let store = temp_store("clears");
        let mut ledger = test_ledger();

        ledger
            .create_item(ItemDraft::new("Green Tea", Some(700), 1000, 10))
            .unwrap();
        commit(&store, &mut ledger).unwrap();

        assert!(!ledger.dirty().any());
        // A second commit with nothing dirty persists nothing.
        let persisted = commit(&store, &mut ledger).unwrap();
        assert!(!persisted.any());
    }

    #[test]
    fn test_settings_default_on_first_run() {
        let store = temp_store("settings-default");
        let settings = load_settings(&store).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_roundtrip() {
        let store = temp_store("settings-roundtrip");
        let settings = Settings {
            currency: "Ks".to_string(),
            tax_rate_bps: 500,
        };

        save_settings(&store, &settings).unwrap();
        assert_eq!(load_settings(&store).unwrap(), settings);
    }
}
