//! Product listing filters.

use rustc_hash::FxHashSet;

use crate::products::models::Product;

/// Which sellers' products to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SellerScope {
    #[default]
    All,
    /// Only products whose seller is the signed in user's display name.
    Mine,
}

/// Search term, category chip and seller scope, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name. Empty matches all;
    /// whitespace is not trimmed.
    pub search: String,
    /// Exact category. `None` or empty matches all.
    pub category: Option<String>,
    pub scope: SellerScope,
}

impl ProductFilter {
    /// Whether `product` passes every active filter.
    ///
    /// `current_user` is the signed in display name; with [`SellerScope::Mine`]
    /// and nobody signed in, nothing matches.
    #[must_use]
    pub fn matches(&self, product: &Product, current_user: Option<&str>) -> bool {
        let by_name = self.search.is_empty()
            || product
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());

        let by_category = match self.category.as_deref() {
            Some(category) if !category.is_empty() => product.category == category,
            _ => true,
        };

        let by_seller = match self.scope {
            SellerScope::All => true,
            SellerScope::Mine => current_user.is_some_and(|name| product.seller == name),
        };

        by_name && by_category && by_seller
    }

    /// Keep the matching products, in listing order.
    #[must_use]
    pub fn apply(&self, products: Vec<Product>, current_user: Option<&str>) -> Vec<Product> {
        products
            .into_iter()
            .filter(|product| self.matches(product, current_user))
            .collect()
    }
}

/// Distinct categories in order of first appearance.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = FxHashSet::default();

    products
        .iter()
        .filter(|product| seen.insert(product.category.as_str()))
        .map(|product| product.category.clone())
        .collect()
}
