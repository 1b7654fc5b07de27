use rust_decimal::Decimal;

use super::product::{Category, Price, Product};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub low: Decimal,
    pub high: Decimal,
}

impl PriceRange {
    pub const fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }

    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        let amount = price.amount();
        self.low <= amount && amount <= self.high
    }
}

impl Default for PriceRange {
    /// Spans every valid price, so the default range never hides a product.
    fn default() -> Self {
        Self::new(Decimal::ZERO, Price::MAX)
    }
}

/// The three independent catalog filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the product name. Empty matches everything.
    pub search_term: String,
    /// `None` means any category.
    pub category: Option<Category>,
    pub price_range: PriceRange,
}

impl FilterCriteria {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_category(product) && self.price_range.contains(product.price)
    }

    fn matches_search(&self, product: &Product) -> bool {
        self.search_term.is_empty()
            || product
                .name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category.is_none_or(|category| category == product.category)
    }

    /// True when any criterion differs from its default.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }
}
