//! Shared data structures exchanged between the core and the presentation shell.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel genre selection that matches every product.
pub const ALL_GENRES: &str = "All";

/// Identifier for a product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Delivery format of a digital book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookFormat {
    #[serde(rename = "EPUB")]
    Epub,
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "MOBI")]
    Mobi,
}

impl BookFormat {
    /// Wire/display form, matching the catalog data set.
    pub fn as_str(self) -> &'static str {
        match self {
            BookFormat::Epub => "EPUB",
            BookFormat::Pdf => "PDF",
            BookFormat::Mobi => "MOBI",
        }
    }
}

/// A digital book as supplied by the catalog data source.
///
/// Records are treated as immutable once loaded; the catalog never rewrites
/// them and the cart snapshots them at first add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub author: String,
    /// Base (undiscounted) unit price, non-negative.
    pub price: f64,
    /// Fraction of `price` subtracted at sale time, in `[0, 1]`.
    pub discount: f64,
    pub genre: String,
    pub description: String,
    /// Opaque URI of the cover art; the core never dereferences it.
    pub cover_image: String,
    pub format: BookFormat,
    /// Reader rating, expected range `[0, 5]`.
    pub rating: f64,
    pub pages: u32,
    pub language: String,
    pub release_date: NaiveDate,
}

impl Product {
    /// Unit price after the discount is applied.
    pub fn effective_price(&self) -> f64 {
        self.price * (1.0 - self.discount)
    }

    /// Discount as a whole-number percentage, for badge display.
    pub fn discount_percent(&self) -> u32 {
        (self.discount * 100.0).round() as u32
    }
}

/// A cart entry: the product as captured when it was first added, plus a
/// quantity that is at least one while the line exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Product) -> Self {
        Self { product, quantity: 1 }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Line total at the discounted unit price.
    pub fn subtotal(&self) -> f64 {
        self.product.effective_price() * f64::from(self.quantity)
    }
}

/// Genre filter choice for catalog queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    /// Matches every product; the selection the filter UI starts on.
    #[default]
    All,
    /// Exact match against a single genre.
    Only(String),
}

impl GenreFilter {
    /// Map a dropdown selection onto a filter; the [`ALL_GENRES`] sentinel
    /// clears it.
    pub fn from_selection(value: &str) -> Self {
        if value == ALL_GENRES { GenreFilter::All } else { GenreFilter::Only(value.to_string()) }
    }

    pub fn matches(&self, genre: &str) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(wanted) => wanted == genre,
        }
    }
}

/// Sort order applied to catalog query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending by title.
    #[default]
    Title,
    /// Ascending by discounted unit price.
    Price,
    /// Descending by reader rating.
    Rating,
}

impl SortKey {
    /// Parse a sort selection from the shell. Unknown values are rejected
    /// rather than silently reordering the result.
    pub fn from_selection(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SortKey::Title),
            "price" => Some(SortKey::Price),
            "rating" => Some(SortKey::Rating),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Price => "price",
            SortKey::Rating => "rating",
        }
    }
}

/// Parameters of a single catalog query.
///
/// Owned by the presentation shell and never persisted; the default value is
/// the cleared state the "clear filters" action resets to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParams {
    pub search: String,
    pub genre: GenreFilter,
    pub sort: SortKey,
}
