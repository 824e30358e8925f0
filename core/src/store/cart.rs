//! The shopping cart: insertion-ordered lines, derived totals, best-effort
//! persistence.

use hashlink::LinkedHashMap;
use tracing::{debug, warn};

use crate::types::{CartLine, Product, ProductId};

use super::storage::Storage;

/// Fixed key the serialized cart lives under in the storage backend.
pub const CART_STORAGE_KEY: &str = "digital-books-cart";

/// Owns the cart state and mirrors it into a storage backend after every
/// mutation.
///
/// The in-memory cart is authoritative; storage is a best-effort mirror so a
/// cart survives across sessions. Every storage failure is absorbed and
/// logged, and browsing and cart edits keep working with a completely broken
/// backend. Writes are suppressed until [`restore`](CartStore::restore) has
/// run, so a restored cart is never clobbered by saving the pre-restore empty
/// state.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: LinkedHashMap<ProductId, CartLine>,
    storage: S,
    initialized: bool,
}

impl<S: Storage> CartStore<S> {
    /// An empty cart over `storage`. Call [`restore`](CartStore::restore)
    /// before the first mutation to pick up the previous session's cart.
    pub fn new(storage: S) -> Self {
        Self { lines: LinkedHashMap::new(), storage, initialized: false }
    }

    /// One-shot restore from storage. Missing, unreadable, or corrupt data
    /// leaves the cart empty; either way the store is marked initialized and
    /// subsequent mutations start persisting. Calling it again is a no-op.
    pub fn restore(&mut self) {
        if self.initialized {
            return;
        }

        match self.storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => {
                    self.lines = lines
                        .into_iter()
                        .filter(|line| line.quantity >= 1)
                        .map(|line| (line.id().clone(), line))
                        .collect();
                    debug!(lines = self.lines.len(), "restored cart from storage");
                }
                Err(err) => warn!(error = %err, "stored cart is corrupt, starting empty"),
            },
            Ok(None) => debug!("no stored cart, starting empty"),
            Err(err) => warn!(error = %err, "failed to read stored cart, starting empty"),
        }

        self.initialized = true;
    }

    /// Add one unit of `product`. An existing line keeps the fields captured
    /// when it was first added; only its quantity moves. New lines append at
    /// the end of the display order.
    pub fn add(&mut self, product: &Product) {
        match self.lines.get_mut(&product.id) {
            Some(line) => line.quantity += 1,
            None => {
                self.lines.insert(product.id.clone(), CartLine::new(product.clone()));
            }
        }
        debug!(id = product.id.as_str(), "added to cart");
        self.persist();
    }

    /// Drop the line for `id`. Absent ids are a no-op, not an error.
    pub fn remove(&mut self, id: &ProductId) {
        if self.lines.remove(id).is_some() {
            debug!(id = id.as_str(), "removed from cart");
        }
        self.persist();
    }

    /// Set the quantity of an existing line. Zero removes the line; ids not
    /// in the cart are left untouched (no line is inserted).
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }

        if let Some(line) = self.lines.get_mut(id) {
            line.quantity = quantity;
        }
        self.persist();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Sum of discounted line subtotals.
    pub fn total(&self) -> f64 {
        self.lines.values().map(CartLine::subtotal).sum()
    }

    /// Total number of units across all lines, not the number of lines.
    pub fn item_count(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    /// Lines in the order their products were first added.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.get(id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the initial restore has run.
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Mirror the current cart into storage. Runs as the final step of every
    /// mutation; suppressed until the initial restore has completed.
    fn persist(&mut self) {
        if !self.initialized {
            return;
        }

        let lines: Vec<&CartLine> = self.lines.values().collect();
        match serde_json::to_string(&lines) {
            Ok(raw) => {
                if let Err(err) = self.storage.set(CART_STORAGE_KEY, &raw) {
                    warn!(error = %err, "failed to persist cart");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize cart"),
        }
    }
}
