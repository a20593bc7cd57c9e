//! # Ledger Engine
//!
//! The [`Ledger`] owns the three collections (items, sale history,
//! purchase history) plus the in-progress cart, and enforces every
//! stock-adjustment rule in one place.
//!
//! ## Consistency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 Stock-Adjustment Rules (the contract)               │
//! │                                                                     │
//! │  record_purchase ──► item stock += quantity   (by name match)       │
//! │  delete_purchase ──► item stock -= quantity   (inverse of above)    │
//! │  update_purchase ──► NO stock change          (documented)          │
//! │  checkout ────────► item stock -= line qty    (per cart line)       │
//! │  delete_sale ─────► NO stock change           (sales are final)     │
//! │  update_item ─────► stock set absolutely      (not incremental)     │
//! │                                                                     │
//! │  Purchases link to items by case-insensitive NAME, a weak lookup    │
//! │  that may find nothing after a rename or delete. That outcome is    │
//! │  reported, never treated as a failure.                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is a synchronous read-modify-write, atomic from the
//! caller's perspective: it either completes fully or returns an error
//! having touched nothing. The ledger tracks which collections each
//! operation dirtied so the persistence layer can commit exactly those.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{LedgerError, LedgerResult};
use crate::money::Money;
use crate::types::{Item, ItemDraft, PurchaseRecord, SaleRecord, TaxRate};
use crate::validation::{
    validate_name, validate_price_cents, validate_quantity, validate_tax_rate_bps,
};

// =============================================================================
// Id Source
// =============================================================================

/// Generates unique record ids.
///
/// Injected into the ledger so tests can produce deterministic ids while
/// production keeps the clock-derived, roughly-ordered scheme the stored
/// data already uses.
pub trait IdSource: Send {
    /// Returns the next id. Must never repeat within one source.
    fn next_id(&mut self) -> i64;
}

/// Clock-based ids: milliseconds since the Unix epoch, bumped past the
/// previous id when two calls land on the same millisecond.
#[derive(Debug, Default)]
pub struct ClockIds {
    last: i64,
}

impl ClockIds {
    pub fn new() -> Self {
        ClockIds { last: 0 }
    }
}

impl IdSource for ClockIds {
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last
    }
}

/// Sequential ids starting at 1, for deterministic tests.
#[derive(Debug)]
pub struct SequentialIds {
    next: i64,
}

impl SequentialIds {
    pub fn new() -> Self {
        SequentialIds { next: 1 }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

// =============================================================================
// Stock Policy
// =============================================================================

/// What happens when a stock decrement would go below zero.
///
/// The decrement paths are sale checkout and purchase deletion. The stored
/// data has always allowed negatives (a purchase deleted after its units
/// were sold leaves a deficit on the books), so that is the default;
/// `ClampToZero` floors every decrement instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StockPolicy {
    /// Decrements may take stock negative (matches the historical books).
    #[default]
    AllowNegative,

    /// Decrements floor at zero.
    ClampToZero,
}

impl StockPolicy {
    /// Applies a decrement of `qty` to `stock` under this policy.
    fn decrement(self, stock: i64, qty: i64) -> i64 {
        match self {
            StockPolicy::AllowNegative => stock - qty,
            StockPolicy::ClampToZero => (stock - qty).max(0),
        }
    }
}

// =============================================================================
// Stock Effect
// =============================================================================

/// How a purchase-side operation affected item stock.
///
/// The name-based item link is weak: the caller must be told whether the
/// stock adjustment actually landed, so the UI can say so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "effect")]
pub enum StockEffect {
    /// A matching item was found and its stock adjusted.
    Applied { item_id: i64, new_stock: i64 },

    /// No item matched the record's name; the record stands alone.
    NoMatchingItem,
}

/// Result of [`Ledger::record_purchase`]: the created record plus whether
/// the paired stock increment found an item to land on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOutcome {
    pub record: PurchaseRecord,
    pub stock: StockEffect,
}

// =============================================================================
// Dirty Set
// =============================================================================

/// Which collections an operation (or a batch of them) has modified since
/// the last commit. The persistence layer re-writes exactly these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtySet {
    pub items: bool,
    pub sales: bool,
    pub purchases: bool,
}

impl DirtySet {
    /// True if anything needs persisting.
    pub fn any(&self) -> bool {
        self.items || self.sales || self.purchases
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// The ledger engine: explicit state, no globals.
///
/// All operations are methods taking `&mut self`; the presentation layer
/// re-reads the collections through the accessor methods after every
/// mutating call.
pub struct Ledger {
    items: Vec<Item>,
    sales: Vec<SaleRecord>,
    purchases: Vec<PurchaseRecord>,
    cart: Cart,
    ids: Box<dyn IdSource>,
    stock_policy: StockPolicy,
    dirty: DirtySet,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("items", &self.items.len())
            .field("sales", &self.sales.len())
            .field("purchases", &self.purchases.len())
            .field("cart_lines", &self.cart.line_count())
            .field("stock_policy", &self.stock_policy)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// A fresh, empty ledger with clock-based ids.
    pub fn new() -> Self {
        Self::with_ids(Box::new(ClockIds::new()))
    }

    /// A fresh, empty ledger with the given id source.
    pub fn with_ids(ids: Box<dyn IdSource>) -> Self {
        Ledger {
            items: Vec::new(),
            sales: Vec::new(),
            purchases: Vec::new(),
            cart: Cart::new(),
            ids,
            stock_policy: StockPolicy::default(),
            dirty: DirtySet::default(),
        }
    }

    /// Rebuilds a ledger from previously persisted collections.
    ///
    /// The cart is always empty on load: it is transient state that never
    /// survives a session.
    pub fn from_collections(
        items: Vec<Item>,
        sales: Vec<SaleRecord>,
        purchases: Vec<PurchaseRecord>,
    ) -> Self {
        let mut ledger = Self::new();
        ledger.items = items;
        ledger.sales = sales;
        ledger.purchases = purchases;
        ledger
    }

    /// Replaces the stock policy (builder style).
    pub fn with_stock_policy(mut self, policy: StockPolicy) -> Self {
        self.stock_policy = policy;
        self
    }

    /// The active stock policy.
    pub fn stock_policy(&self) -> StockPolicy {
        self.stock_policy
    }

    // =========================================================================
    // Accessors (the presentation layer re-reads these after every call)
    // =========================================================================

    /// All items, most recently created first.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Looks up an item by id.
    pub fn item(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items whose name contains `query`, case-insensitively.
    /// An empty query matches everything.
    pub fn search_items(&self, query: &str) -> Vec<&Item> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Sale history, most recent first.
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// Purchase history, most recent first.
    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.purchases
    }

    /// The sale in progress.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Collections modified since the last [`take_dirty`](Self::take_dirty).
    pub fn dirty(&self) -> DirtySet {
        self.dirty
    }

    /// Returns and clears the dirty set. The persistence layer calls this
    /// at its commit boundary.
    pub fn take_dirty(&mut self) -> DirtySet {
        std::mem::take(&mut self.dirty)
    }

    // =========================================================================
    // Item Operations
    // =========================================================================

    /// Creates a new item from a draft.
    ///
    /// Validates before touching anything: an empty name or a negative
    /// price aborts with no mutation. An absent purchase price defaults
    /// to 0. The new item gets a fresh unique id and goes to the front of
    /// the collection.
    pub fn create_item(&mut self, draft: ItemDraft) -> LedgerResult<Item> {
        let name = validate_name(&draft.name)?;
        let purchase_price_cents = draft.purchase_price_cents.unwrap_or(0);
        validate_price_cents("purchasePrice", purchase_price_cents)?;
        validate_price_cents("salePrice", draft.sale_price_cents)?;

        let item = Item {
            id: self.ids.next_id(),
            name,
            purchase_price_cents,
            sale_price_cents: draft.sale_price_cents,
            stock: draft.stock,
        };

        self.items.insert(0, item.clone());
        self.dirty.items = true;
        Ok(item)
    }

    /// Overwrites an item's fields in place.
    ///
    /// The stock value is set absolutely, not as an incremental
    /// adjustment. Returns `false` (a silent no-op, tolerating stale UI
    /// state) when the id no longer exists.
    pub fn update_item(&mut self, id: i64, draft: ItemDraft) -> LedgerResult<bool> {
        let name = validate_name(&draft.name)?;
        let purchase_price_cents = draft.purchase_price_cents.unwrap_or(0);
        validate_price_cents("purchasePrice", purchase_price_cents)?;
        validate_price_cents("salePrice", draft.sale_price_cents)?;

        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };

        item.name = name;
        item.purchase_price_cents = purchase_price_cents;
        item.sale_price_cents = draft.sale_price_cents;
        item.stock = draft.stock;

        self.dirty.items = true;
        Ok(true)
    }

    /// Removes an item from the collection.
    ///
    /// Historical sale and purchase records are untouched: they carry
    /// denormalized copies of the item data. Returns whether anything was
    /// removed.
    pub fn delete_item(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);

        let removed = self.items.len() != before;
        if removed {
            self.dirty.items = true;
        }
        removed
    }

    // =========================================================================
    // Purchase Operations
    // =========================================================================

    /// Records an inventory purchase and applies the paired stock
    /// increment.
    ///
    /// The record always lands at the front of purchase history. The stock
    /// increment lands only if an item matches the name case-insensitively;
    /// either way the outcome says which branch occurred, so the UI can
    /// tell the user when no item was touched.
    pub fn record_purchase(
        &mut self,
        name: &str,
        quantity: i64,
        total_cents: i64,
    ) -> LedgerResult<PurchaseOutcome> {
        let name = validate_name(name)?;
        validate_quantity(quantity)?;
        validate_price_cents("totalAmount", total_cents)?;

        let record = PurchaseRecord {
            id: self.ids.next_id(),
            name,
            quantity,
            total_cents,
            unit_price_cents: Money::from_cents(total_cents)
                .divide_quantity(quantity)
                .cents(),
            date: Utc::now(),
        };

        let stock = match self.items.iter_mut().find(|i| i.matches_name(&record.name)) {
            Some(item) => {
                item.stock += quantity;
                self.dirty.items = true;
                StockEffect::Applied {
                    item_id: item.id,
                    new_stock: item.stock,
                }
            }
            None => StockEffect::NoMatchingItem,
        };

        self.purchases.insert(0, record.clone());
        self.dirty.purchases = true;

        Ok(PurchaseOutcome { record, stock })
    }

    /// Replaces a purchase record's fields, preserving its original date.
    ///
    /// Explicitly does NOT adjust stock: the original increment cannot be
    /// safely un-applied and re-applied without knowing the stock state it
    /// landed on. The caller reconciles stock manually after an edit. This
    /// asymmetry with create/delete is deliberate.
    ///
    /// Returns `false` (silent no-op) when the id no longer exists.
    pub fn update_purchase(
        &mut self,
        id: i64,
        name: &str,
        quantity: i64,
        total_cents: i64,
    ) -> LedgerResult<bool> {
        let name = validate_name(name)?;
        validate_quantity(quantity)?;
        validate_price_cents("totalAmount", total_cents)?;

        let Some(record) = self.purchases.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };

        record.name = name;
        record.quantity = quantity;
        record.total_cents = total_cents;
        record.unit_price_cents = Money::from_cents(total_cents)
            .divide_quantity(quantity)
            .cents();
        // record.date stays as it was

        self.dirty.purchases = true;
        Ok(true)
    }

    /// Deletes a purchase record and rolls back its stock increment.
    ///
    /// The inverse of [`record_purchase`](Self::record_purchase): a
    /// matching item loses the record's quantity again, subject to the
    /// stock policy. When no other mutation intervened this restores the
    /// pre-purchase stock exactly.
    ///
    /// Returns `None` (silent no-op) when the id no longer exists,
    /// otherwise how stock was affected.
    pub fn delete_purchase(&mut self, id: i64) -> Option<StockEffect> {
        let index = self.purchases.iter().position(|r| r.id == id)?;
        let record = self.purchases.remove(index);
        self.dirty.purchases = true;

        let effect = match self.items.iter_mut().find(|i| i.matches_name(&record.name)) {
            Some(item) => {
                item.stock = self.stock_policy.decrement(item.stock, record.quantity);
                self.dirty.items = true;
                StockEffect::Applied {
                    item_id: item.id,
                    new_stock: item.stock,
                }
            }
            None => StockEffect::NoMatchingItem,
        };

        Some(effect)
    }

    // =========================================================================
    // Cart & Sale Operations
    // =========================================================================

    /// Adjusts the cart line for an item by `delta` (±1 from the grid/cart
    /// buttons, but any step works).
    ///
    /// Refuses with [`LedgerError::InsufficientStock`] if the resulting
    /// quantity would exceed the item's current stock; the line is left
    /// unchanged. An unknown item id is a silent no-op (stale UI state).
    /// Item stock is not touched; it is committed at checkout.
    pub fn add_to_cart(&mut self, item_id: i64, delta: i64) -> LedgerResult<()> {
        let Some(item) = self.items.iter().find(|i| i.id == item_id) else {
            return Ok(());
        };
        self.cart.adjust(item, delta)
    }

    /// Empties the cart without creating a sale.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Completes the sale in progress.
    ///
    /// The single most side-effectful transaction, all-or-nothing:
    /// 1. Rejects an empty cart (nothing mutated)
    /// 2. Computes subtotal, tax (`subtotal × rate`), and total
    /// 3. Freezes a deep copy of the cart lines into a new [`SaleRecord`]
    ///    at the front of sale history
    /// 4. Decrements stock on every referenced item by its line quantity
    ///    (an item deleted since it was carted is skipped silently)
    /// 5. Clears the cart
    ///
    /// Returns the new record for display.
    pub fn checkout(&mut self, tax_rate: TaxRate) -> LedgerResult<SaleRecord> {
        validate_tax_rate_bps(tax_rate.bps())?;

        if self.cart.is_empty() {
            return Err(LedgerError::EmptyCart);
        }

        let subtotal_cents = self.cart.subtotal_cents();
        let tax_cents = self.cart.tax_cents(tax_rate);

        let record = SaleRecord {
            id: self.ids.next_id(),
            lines: self.cart.lines().to_vec(),
            subtotal_cents,
            tax_cents,
            total_cents: subtotal_cents + tax_cents,
            date: Utc::now(),
        };

        for line in record.lines.iter() {
            if let Some(item) = self.items.iter_mut().find(|i| i.id == line.item_id) {
                item.stock = self.stock_policy.decrement(item.stock, line.quantity);
            }
        }

        self.sales.insert(0, record.clone());
        self.cart.clear();
        self.dirty.sales = true;
        self.dirty.items = true;

        Ok(record)
    }

    /// Deletes a sale record.
    ///
    /// Stock is NOT restored: sales are treated as final, unlike purchases.
    /// (Deliberate asymmetry with [`delete_purchase`](Self::delete_purchase),
    /// kept from the books this ledger replaces.) Returns whether anything
    /// was removed.
    pub fn delete_sale(&mut self, id: i64) -> bool {
        let before = self.sales.len();
        self.sales.retain(|r| r.id != id);

        let removed = self.sales.len() != before;
        if removed {
            self.dirty.sales = true;
        }
        removed
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;

    fn test_ledger() -> Ledger {
        Ledger::with_ids(Box::new(SequentialIds::new()))
    }

    fn draft(name: &str, sale_price_cents: i64, stock: i64) -> ItemDraft {
        ItemDraft::new(name, Some(sale_price_cents / 2), sale_price_cents, stock)
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    #[test]
    fn test_create_item_ids_are_unique() {
        let mut ledger = test_ledger();

        for i in 0..20 {
            ledger
                .create_item(draft(&format!("Item {}", i), 1000, 5))
                .unwrap();
        }

        let mut ids: Vec<i64> = ledger.items().iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_clock_ids_never_repeat() {
        let mut ids = ClockIds::new();
        let mut seen = Vec::new();
        for _ in 0..100 {
            seen.push(ids.next_id());
        }
        for pair in seen.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_create_item_defaults_purchase_price() {
        let mut ledger = test_ledger();
        let item = ledger
            .create_item(ItemDraft::new("Green Tea", None, 1000, 5))
            .unwrap();
        assert_eq!(item.purchase_price_cents, 0);
    }

    #[test]
    fn test_create_item_rejects_empty_name() {
        let mut ledger = test_ledger();
        let err = ledger.create_item(draft("   ", 1000, 5)).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(ledger.items().is_empty());
        assert!(!ledger.dirty().any());
    }

    #[test]
    fn test_create_item_prepends() {
        let mut ledger = test_ledger();
        ledger.create_item(draft("First", 1000, 5)).unwrap();
        ledger.create_item(draft("Second", 1000, 5)).unwrap();
        assert_eq!(ledger.items()[0].name, "Second");
    }

    #[test]
    fn test_update_item_is_idempotent() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        let edit = ItemDraft::new("Green Tea Large", Some(800), 1200, 9);
        assert!(ledger.update_item(id, edit.clone()).unwrap());
        let once = ledger.item(id).unwrap().clone();

        assert!(ledger.update_item(id, edit).unwrap());
        assert_eq!(ledger.item(id).unwrap(), &once);
    }

    #[test]
    fn test_update_item_unknown_id_is_noop() {
        let mut ledger = test_ledger();
        assert!(!ledger.update_item(999, draft("Ghost", 100, 1)).unwrap());
        assert!(!ledger.dirty().any());
    }

    #[test]
    fn test_update_item_sets_stock_absolutely() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        ledger
            .update_item(id, ItemDraft::new("Green Tea", Some(500), 1000, 42))
            .unwrap();
        assert_eq!(ledger.item(id).unwrap().stock, 42);
    }

    #[test]
    fn test_delete_item_leaves_history_untouched() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        ledger.record_purchase("Green Tea", 3, 2100).unwrap();
        ledger.add_to_cart(id, 1).unwrap();
        ledger.checkout(TaxRate::zero()).unwrap();

        let sales_before = ledger.sales().to_vec();
        let purchases_before = ledger.purchases().to_vec();

        assert!(ledger.delete_item(id));

        assert!(ledger.item(id).is_none());
        assert_eq!(ledger.sales(), sales_before.as_slice());
        assert_eq!(ledger.purchases(), purchases_before.as_slice());
    }

    #[test]
    fn test_search_items() {
        let mut ledger = test_ledger();
        ledger.create_item(draft("Green Tea", 1000, 5)).unwrap();
        ledger.create_item(draft("Black Tea", 1000, 5)).unwrap();
        ledger.create_item(draft("Coffee", 1500, 5)).unwrap();

        assert_eq!(ledger.search_items("tea").len(), 2);
        assert_eq!(ledger.search_items("GREEN").len(), 1);
        assert_eq!(ledger.search_items("").len(), 3);
        assert!(ledger.search_items("soda").is_empty());
    }

    // -------------------------------------------------------------------------
    // Purchases
    // -------------------------------------------------------------------------

    #[test]
    fn test_record_purchase_increments_matching_stock() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        // Name match is case-insensitive.
        let outcome = ledger.record_purchase("green tea", 4, 1000).unwrap();

        assert_eq!(
            outcome.stock,
            StockEffect::Applied {
                item_id: id,
                new_stock: 9
            }
        );
        assert_eq!(ledger.item(id).unwrap().stock, 9);
        // unit price = round(1000 / 4) = 250
        assert_eq!(outcome.record.unit_price_cents, 250);
        assert_eq!(ledger.purchases()[0], outcome.record);
    }

    #[test]
    fn test_record_purchase_matches_unicode_cased_names() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Café Latte", 1000, 5)).unwrap().id;

        let outcome = ledger.record_purchase("CAFÉ LATTE", 3, 1500).unwrap();

        assert_eq!(
            outcome.stock,
            StockEffect::Applied {
                item_id: id,
                new_stock: 8
            }
        );
        assert_eq!(ledger.item(id).unwrap().stock, 8);
    }

    #[test]
    fn test_record_purchase_rounds_unit_price() {
        let mut ledger = test_ledger();
        // 10.00 across 3 units → 3.33
        let outcome = ledger.record_purchase("Anything", 3, 1000).unwrap();
        assert_eq!(outcome.record.unit_price_cents, 333);
    }

    #[test]
    fn test_record_purchase_without_matching_item() {
        let mut ledger = test_ledger();
        let outcome = ledger.record_purchase("Unknown Thing", 2, 500).unwrap();

        assert_eq!(outcome.stock, StockEffect::NoMatchingItem);
        assert_eq!(ledger.purchases().len(), 1);
    }

    #[test]
    fn test_record_purchase_rejects_bad_quantity() {
        let mut ledger = test_ledger();
        assert!(ledger.record_purchase("Green Tea", 0, 500).is_err());
        assert!(ledger.record_purchase("Green Tea", -3, 500).is_err());
        assert!(ledger.purchases().is_empty());
    }

    #[test]
    fn test_delete_purchase_inverts_record_purchase() {
        let mut ledger = test_ledger();
        let item_id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        let outcome = ledger.record_purchase("Green Tea", 4, 1000).unwrap();
        assert_eq!(ledger.item(item_id).unwrap().stock, 9);

        let effect = ledger.delete_purchase(outcome.record.id).unwrap();
        assert_eq!(
            effect,
            StockEffect::Applied {
                item_id,
                new_stock: 5
            }
        );
        assert_eq!(ledger.item(item_id).unwrap().stock, 5);
        assert!(ledger.purchases().is_empty());
    }

    #[test]
    fn test_delete_purchase_unknown_id_is_noop() {
        let mut ledger = test_ledger();
        assert!(ledger.delete_purchase(404).is_none());
    }

    #[test]
    fn test_delete_purchase_after_rename_leaves_stock_alone() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;
        let outcome = ledger.record_purchase("Green Tea", 4, 1000).unwrap();

        // Renaming the item breaks the weak name link.
        ledger
            .update_item(id, ItemDraft::new("Jasmine Tea", Some(500), 1000, 9))
            .unwrap();

        let effect = ledger.delete_purchase(outcome.record.id).unwrap();
        assert_eq!(effect, StockEffect::NoMatchingItem);
        assert_eq!(ledger.item(id).unwrap().stock, 9);
    }

    #[test]
    fn test_update_purchase_preserves_date_and_stock() {
        let mut ledger = test_ledger();
        let item_id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;
        let outcome = ledger.record_purchase("Green Tea", 4, 1000).unwrap();
        let original_date = outcome.record.date;

        // Edit changes the fields but must leave stock exactly as it was.
        assert!(ledger
            .update_purchase(outcome.record.id, "Green Tea", 10, 3000)
            .unwrap());

        let record = &ledger.purchases()[0];
        assert_eq!(record.quantity, 10);
        assert_eq!(record.total_cents, 3000);
        assert_eq!(record.unit_price_cents, 300);
        assert_eq!(record.date, original_date);
        assert_eq!(ledger.item(item_id).unwrap().stock, 9); // unchanged
    }

    #[test]
    fn test_update_purchase_unknown_id_is_noop() {
        let mut ledger = test_ledger();
        assert!(!ledger.update_purchase(404, "Ghost", 1, 100).unwrap());
    }

    // -------------------------------------------------------------------------
    // Cart & Checkout
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_to_cart_refuses_beyond_stock() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 3)).unwrap().id;

        for _ in 0..3 {
            ledger.add_to_cart(id, 1).unwrap();
        }
        assert_eq!(ledger.cart().line(id).unwrap().quantity, 3);

        let err = ledger.add_to_cart(id, 1).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientStock { .. }));
        assert_eq!(ledger.cart().line(id).unwrap().quantity, 3);
    }

    #[test]
    fn test_add_to_cart_unknown_item_is_noop() {
        let mut ledger = test_ledger();
        ledger.add_to_cart(12345, 1).unwrap();
        assert!(ledger.cart().is_empty());
    }

    #[test]
    fn test_add_to_cart_does_not_touch_stock() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        ledger.add_to_cart(id, 1).unwrap();
        ledger.add_to_cart(id, 1).unwrap();

        assert_eq!(ledger.item(id).unwrap().stock, 5);
    }

    #[test]
    fn test_checkout_worked_example() {
        // Cart [{A, qty 2, price 100.00}, {B, qty 1, price 50.00}] at 10%:
        // subtotal 250.00, tax 25.00, total 275.00.
        let mut ledger = test_ledger();
        let a = ledger.create_item(draft("Item A", 10000, 5)).unwrap().id;
        let b = ledger.create_item(draft("Item B", 5000, 4)).unwrap().id;

        ledger.add_to_cart(a, 1).unwrap();
        ledger.add_to_cart(a, 1).unwrap();
        ledger.add_to_cart(b, 1).unwrap();

        let record = ledger.checkout(TaxRate::from_bps(1000)).unwrap();

        assert_eq!(record.subtotal_cents, 25000);
        assert_eq!(record.tax_cents, 2500);
        assert_eq!(record.total_cents, 27500);

        assert_eq!(ledger.item(a).unwrap().stock, 3); // 5 - 2
        assert_eq!(ledger.item(b).unwrap().stock, 3); // 4 - 1
        assert!(ledger.cart().is_empty());
        assert_eq!(ledger.sales()[0], record);
    }

    #[test]
    fn test_checkout_snapshot_survives_item_edits() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;
        ledger.add_to_cart(id, 1).unwrap();
        let record = ledger.checkout(TaxRate::zero()).unwrap();

        ledger
            .update_item(id, ItemDraft::new("Renamed", Some(1), 9999, 0))
            .unwrap();

        let stored = &ledger.sales()[0];
        assert_eq!(stored, &record);
        assert_eq!(stored.lines[0].name, "Green Tea");
        assert_eq!(stored.lines[0].sale_price_cents, 1000);
    }

    #[test]
    fn test_checkout_empty_cart_is_rejected() {
        let mut ledger = test_ledger();
        let err = ledger.checkout(TaxRate::zero()).unwrap_err();
        assert!(matches!(err, LedgerError::EmptyCart));
        assert!(ledger.sales().is_empty());
    }

    #[test]
    fn test_checkout_skips_item_deleted_after_carting() {
        let mut ledger = test_ledger();
        let a = ledger.create_item(draft("Item A", 10000, 5)).unwrap().id;
        let b = ledger.create_item(draft("Item B", 5000, 4)).unwrap().id;

        ledger.add_to_cart(a, 1).unwrap();
        ledger.add_to_cart(b, 1).unwrap();
        ledger.delete_item(a);

        let record = ledger.checkout(TaxRate::zero()).unwrap();

        // The record still carries the frozen line; only the live
        // decrement is skipped.
        assert_eq!(record.lines.len(), 2);
        assert_eq!(ledger.item(b).unwrap().stock, 3);
    }

    #[test]
    fn test_sale_records_are_most_recent_first() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 10)).unwrap().id;

        ledger.add_to_cart(id, 1).unwrap();
        let first = ledger.checkout(TaxRate::zero()).unwrap();
        ledger.add_to_cart(id, 1).unwrap();
        let second = ledger.checkout(TaxRate::zero()).unwrap();

        assert_eq!(ledger.sales()[0].id, second.id);
        assert_eq!(ledger.sales()[1].id, first.id);
    }

    // -------------------------------------------------------------------------
    // Asymmetries & Stock Policy
    // -------------------------------------------------------------------------

    #[test]
    fn test_delete_sale_does_not_restock() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        ledger.add_to_cart(id, 1).unwrap();
        ledger.add_to_cart(id, 1).unwrap();
        let record = ledger.checkout(TaxRate::zero()).unwrap();
        assert_eq!(ledger.item(id).unwrap().stock, 3);

        // Sales are final: deleting the record leaves stock at 3.
        assert!(ledger.delete_sale(record.id));
        assert_eq!(ledger.item(id).unwrap().stock, 3);
        assert!(ledger.sales().is_empty());
    }

    #[test]
    fn test_delete_purchase_does_restock_unlike_delete_sale() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        let outcome = ledger.record_purchase("Green Tea", 2, 1000).unwrap();
        assert_eq!(ledger.item(id).unwrap().stock, 7);

        // Purchases roll back: deleting the record undoes the increment.
        ledger.delete_purchase(outcome.record.id).unwrap();
        assert_eq!(ledger.item(id).unwrap().stock, 5);
    }

    #[test]
    fn test_negative_stock_allowed_by_default() {
        let mut ledger = test_ledger();
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        // Purchase 3 (stock 8), sell 6, then delete the purchase: the
        // rollback takes stock to -1.
        let outcome = ledger.record_purchase("Green Tea", 3, 1500).unwrap();
        for _ in 0..6 {
            ledger.add_to_cart(id, 1).unwrap();
        }
        ledger.checkout(TaxRate::zero()).unwrap();
        assert_eq!(ledger.item(id).unwrap().stock, 2);

        ledger.delete_purchase(outcome.record.id).unwrap();
        assert_eq!(ledger.item(id).unwrap().stock, -1);
    }

    #[test]
    fn test_clamp_to_zero_policy_floors_decrements() {
        let mut ledger = test_ledger().with_stock_policy(StockPolicy::ClampToZero);
        let id = ledger.create_item(draft("Green Tea", 1000, 5)).unwrap().id;

        let outcome = ledger.record_purchase("Green Tea", 3, 1500).unwrap();
        for _ in 0..6 {
            ledger.add_to_cart(id, 1).unwrap();
        }
        ledger.checkout(TaxRate::zero()).unwrap();
        assert_eq!(ledger.item(id).unwrap().stock, 2);

        ledger.delete_purchase(outcome.record.id).unwrap();
        assert_eq!(ledger.item(id).unwrap().stock, 0);
    }

    // -------------------------------------------------------------------------
    // Dirty Tracking
    // -------------------------------------------------------------------------

    #[test]
    fn test_dirty_tracking_per_collection() {
        let mut ledger = test_ledger();

        ledger.create_item(draft("Green Tea", 1000, 5)).unwrap();
        assert_eq!(
            ledger.dirty(),
            DirtySet {
                items: true,
                sales: false,
                purchases: false
            }
        );

        // take_dirty clears the set.
        assert!(ledger.take_dirty().any());
        assert!(!ledger.dirty().any());

        ledger.record_purchase("Green Tea", 1, 500).unwrap();
        let dirty = ledger.take_dirty();
        assert!(dirty.purchases);
        assert!(dirty.items); // stock moved too

        let id = ledger.items()[0].id;
        ledger.add_to_cart(id, 1).unwrap();
        // Cart changes are transient; nothing to persist yet.
        assert!(!ledger.dirty().any());

        ledger.checkout(TaxRate::zero()).unwrap();
        let dirty = ledger.take_dirty();
        assert!(dirty.sales);
        assert!(dirty.items);
        assert!(!dirty.purchases);
    }
}
