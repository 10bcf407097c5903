//! Pet store page: product catalog filtered by tab, category, store and text.
//!
//! DESIGN
//! ======
//! The tab and the category dropdown both filter on category and must both
//! match. Stock is free text on the backend, so availability is classified
//! here rather than trusted as a number.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use super::{field_matches, search_needle, showing_label};
use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{Product, ProductCategory, Store};
use crate::services;

pub const FETCH_ERROR: &str = "Failed to fetch products";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    #[must_use]
    pub fn button_label(self) -> &'static str {
        match self {
            Self::InStock => "Buy Now",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

/// Classify a free-text stock value.
///
/// `"Out of Stock"` (any case) and numbers at or below zero are out of stock;
/// other text such as `"Available"` counts as in stock.
#[must_use]
pub fn stock_status(raw: &str) -> StockStatus {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("out of stock") {
        return StockStatus::OutOfStock;
    }
    match raw.parse::<f64>() {
        Ok(quantity) if quantity <= 0.0 => StockStatus::OutOfStock,
        _ => StockStatus::InStock,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub all: usize,
    pub food: usize,
    pub toy: usize,
    pub accessory: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StorePage {
    pub products: Vec<Product>,
    pub stores: Vec<Store>,
    pub tab: Option<ProductCategory>,
    pub category: Option<ProductCategory>,
    pub store_id: Option<String>,
    pub search: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for StorePage {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            stores: Vec::new(),
            tab: None,
            category: None,
            store_id: None,
            search: String::new(),
            is_loading: true,
            error: None,
        }
    }
}

impl StorePage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load stores and products together. A store failure only empties the
    /// store filter; a product failure sets the page error.
    pub async fn mount(&mut self, api: &ApiClient) {
        self.is_loading = true;
        let (stores, products) = tokio::join!(services::stores::list(api), services::products::list(api));
        self.stores = stores.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to fetch stores");
            Vec::new()
        });
        self.apply_products(products);
        self.is_loading = false;
    }

    pub async fn refresh_products(&mut self, api: &ApiClient) {
        self.is_loading = true;
        let products = services::products::list(api).await;
        self.apply_products(products);
        self.is_loading = false;
    }

    fn apply_products(&mut self, products: Result<Vec<Product>, ApiError>) {
        match products {
            Ok(products) => {
                self.products = products;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch products");
                self.error = Some(FETCH_ERROR.to_owned());
            }
        }
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        let needle = search_needle(&self.search);
        self.products
            .iter()
            .filter(|product| self.tab.is_none_or(|tab| product.category == tab))
            .filter(|product| self.category.is_none_or(|category| product.category == category))
            .filter(|product| self.store_id.as_deref().is_none_or(|key| self.sold_by(product, key)))
            .filter(|product| {
                needle.is_empty()
                    || field_matches(Some(product.name.as_str()), &needle)
                    || field_matches(product.description.as_deref(), &needle)
            })
            .collect()
    }

    /// Products name their store rather than carrying its id, so a store
    /// filter matches either the id (resolved through `stores`) or the name.
    fn sold_by(&self, product: &Product, key: &str) -> bool {
        if !product.store.id.is_empty() && product.store.id == key {
            return true;
        }
        let name = self.stores.iter().find(|store| store.id == key).map_or(key, |store| store.name.as_str());
        !product.store.name.is_empty() && product.store.name == name
    }

    #[must_use]
    pub fn category_counts(&self) -> CategoryCounts {
        let count = |category: ProductCategory| self.products.iter().filter(|p| p.category == category).count();
        CategoryCounts {
            all: self.products.len(),
            food: count(ProductCategory::Food),
            toy: count(ProductCategory::Toy),
            accessory: count(ProductCategory::Accessory),
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        showing_label(self.visible().len(), self.products.len(), "products")
    }
}
