//! Pure filter/sort pipeline over the catalog.

use std::cmp::Ordering;

use crate::types::{Product, QueryParams, SortKey};

use super::{Catalog, order};

/// Run `params` against the catalog and return the products to render, in
/// display order.
///
/// Side-effect free: the catalog is never mutated and identical inputs yield
/// identical output. The text and genre predicates AND-combine; the sort is
/// stable, so filtered products with equal keys keep their catalog order.
pub fn query<'a>(catalog: &'a Catalog, params: &QueryParams) -> Vec<&'a Product> {
    let needle = params.search.to_lowercase();

    let mut matches: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|product| matches_search(product, &needle) && params.genre.matches(&product.genre))
        .collect();

    match params.sort {
        SortKey::Title => matches.sort_by(|a, b| order::title_cmp(&a.title, &b.title)),
        SortKey::Price => {
            matches.sort_by(|a, b| float_cmp(a.effective_price(), b.effective_price()))
        }
        SortKey::Rating => matches.sort_by(|a, b| float_cmp(b.rating, a.rating)),
    }

    matches
}

/// Case-insensitive substring match against title, author, and description.
/// An empty needle matches everything.
fn matches_search(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    product.title.to_lowercase().contains(needle)
        || product.author.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

fn float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
