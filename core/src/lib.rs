//! Core library for the digital-book storefront.
//!
//! Two collaborating pieces, both plain logic over data: the catalog query
//! engine (filter/sort over a read-only product list) and the cart store
//! (insertion-ordered lines persisted best-effort into a key-value backend).
//! The presentation shell owns the event loop and holds a [`Storefront`].

#![deny(missing_debug_implementations)]

pub mod catalog;
pub mod log;
pub mod session;
pub mod store;
pub mod types;
pub mod util;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub use catalog::{Catalog, query};
pub use session::Storefront;
pub use store::{CART_STORAGE_KEY, CartStore, FileStorage, MemoryStorage, Storage};
pub use types::{
    ALL_GENRES, BookFormat, CartLine, GenreFilter, Product, ProductId, QueryParams, SortKey,
};

/// Returns the version of the core crate for telemetry and debugging.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
