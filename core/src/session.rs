//! Session facade handed to the presentation shell.

use crate::catalog::{self, Catalog};
use crate::store::cart::CartStore;
use crate::store::storage::Storage;
use crate::types::{CartLine, Product, ProductId, QueryParams};

/// One handle over the whole storefront: the catalog, its query engine, and
/// the cart.
///
/// Mutations take `&mut self`; the shell drives everything from a single
/// event loop, so there is no interior locking.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Catalog,
    cart: CartStore<S>,
}

impl<S: Storage> Storefront<S> {
    /// Open a session: wrap the catalog and restore the previous session's
    /// cart from `storage`.
    pub fn open(catalog: Catalog, storage: S) -> Self {
        let mut cart = CartStore::new(storage);
        cart.restore();
        Self { catalog, cart }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Products matching `params`, in display order.
    pub fn visible_products(&self, params: &QueryParams) -> Vec<&Product> {
        catalog::query(&self.catalog, params)
    }

    /// Choices for the genre filter dropdown.
    pub fn genres(&self) -> &[String] {
        self.catalog.genres()
    }

    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add(product);
    }

    /// Add one unit of the catalog product with `id`. Ids not in the catalog
    /// are ignored.
    pub fn add_to_cart_by_id(&mut self, id: &ProductId) {
        let Some(product) = self.catalog.get(id).cloned() else { return };
        self.cart.add(&product);
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.cart.remove(id);
    }

    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        self.cart.set_quantity(id, quantity);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.cart.lines()
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.total()
    }

    pub fn cart_item_count(&self) -> u32 {
        self.cart.item_count()
    }
}
