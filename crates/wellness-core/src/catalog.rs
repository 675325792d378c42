//! # Catalog Snapshot
//!
//! The last-fetched product list, reduced to what a customer may buy.
//!
//! ```text
//! GET /medicines ──► [Product...] ──► Catalog::from_products(today)
//!                                          │ keeps quantity > 0, not expired
//!                                          ▼
//!                         get(id) / browse(search, category) / categories()
//! ```
//!
//! Stock is never re-read live. Cart ceilings come from this snapshot.

use chrono::NaiveDate;

use crate::types::{Product, ProductId};

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "ALL";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a snapshot, dropping products that cannot be sold on `today`.
    pub fn from_products<I>(products: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = Product>,
    {
        Catalog {
            products: products
                .into_iter()
                .filter(|p| p.is_available_on(today))
                .collect(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Filters by case-insensitive name substring and category.
    ///
    /// An empty search matches everything; `"ALL"` disables the category
    /// filter.
    pub fn browse(&self, search: &str, category: &str) -> Vec<&Product> {
        let needle = search.trim().to_lowercase();

        self.products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .filter(|p| category == ALL_CATEGORIES || p.category == category)
            .collect()
    }

    /// Distinct categories in first-seen order, prefixed with `"ALL"`.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }
}
