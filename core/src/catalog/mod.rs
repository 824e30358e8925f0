//! Catalog access layer: the read-only product list and its query engine.

pub mod order;
mod query;

pub use order::{natural_cmp, title_cmp};
pub use query::query;

use std::collections::{BTreeSet, HashSet};

use anyhow::bail;

use crate::types::{ALL_GENRES, Product, ProductId};

/// Shared result type for catalog operations.
pub type Result<T> = crate::Result<T>;

/// The finite, read-only product list the storefront sells from.
///
/// The genre list for the filter UI is derived once at construction; the
/// catalog never changes afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    genres: Vec<String>,
}

impl Catalog {
    /// Build a catalog from externally supplied records. Product ids must be
    /// unique; this is the one point where records enter the system, so the
    /// invariant is checked here and nowhere else.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(&product.id) {
                bail!("duplicate product id {:?} in catalog", product.id.as_str());
            }
        }

        let genres = derive_genres(&products);
        Ok(Self { products, genres })
    }

    /// Deserialize a catalog from its JSON wire form (an array of products).
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_slice(bytes)?;
        Self::new(products)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Choices for the genre filter: distinct genres sorted ascending, behind
    /// the [`ALL_GENRES`] sentinel.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}

fn derive_genres(products: &[Product]) -> Vec<String> {
    let distinct: BTreeSet<&str> = products.iter().map(|product| product.genre.as_str()).collect();

    let mut genres = Vec::with_capacity(distinct.len() + 1);
    genres.push(ALL_GENRES.to_string());
    genres.extend(distinct.into_iter().map(String::from));
    genres
}
