use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest stock level an admin may enter for a product.
pub const MAX_STOCK: u32 = 10_000;

/// Stock at or below this level (and above zero) is shown as low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// The closed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Chocolate,
    Gummies,
    #[serde(rename = "Hard Candy")]
    HardCandy,
    Lollipops,
    Specialty,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Chocolate,
        Self::Gummies,
        Self::HardCandy,
        Self::Lollipops,
        Self::Specialty,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chocolate => "Chocolate",
            Self::Gummies => "Gummies",
            Self::HardCandy => "Hard Candy",
            Self::Lollipops => "Lollipops",
            Self::Specialty => "Specialty",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Errors that can occur when constructing a [`Price`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("price must be greater than zero")]
    NotPositive,
    #[error("price must be at most {max}")]
    TooHigh { max: Decimal },
}

/// A unit price in dollars.
///
/// ## Constraints
///
/// - Strictly positive
/// - At most [`Price::MAX`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// 10000.00
    pub const MAX: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

    /// Create a price, rejecting zero, negative and out-of-range amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] if the amount is not in `(0, MAX]`.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        if amount > Self::MAX {
            return Err(PriceError::TooHigh { max: Self::MAX });
        }
        Ok(Self(amount))
    }

    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Badge shown next to a product's stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    Low,
    InStock,
}

impl StockStatus {
    #[must_use]
    pub const fn for_stock(stock: u32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            Self::Low
        } else {
            Self::InStock
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::Low => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

/// Represents a product in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, draft: ProductDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            category: draft.category,
            price: draft.price,
            stock: draft.stock,
            description: draft.description,
        }
    }

    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::for_stock(self.stock)
    }

    /// Replace every editable field with the draft's values, keeping the ID.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.category = draft.category;
        self.price = draft.price;
        self.stock = draft.stock;
        self.description = draft.description;
    }

    /// The editable fields of this product, e.g. to pre-fill an edit form.
    #[must_use]
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            category: self.category,
            price: self.price,
            stock: self.stock,
            description: self.description.clone(),
        }
    }
}

/// Validated product fields, used both to create a product and to replace an
/// existing one's fields on edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub stock: u32,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bounds() {
        assert_eq!(Price::new(Decimal::ZERO), Err(PriceError::NotPositive));
        assert_eq!(Price::new(Decimal::new(-1, 0)), Err(PriceError::NotPositive));
        assert!(Price::new(Decimal::new(1, 2)).is_ok());
        assert!(Price::new(Price::MAX).is_ok());
        assert_eq!(
            Price::new(Decimal::new(1_000_001, 2)),
            Err(PriceError::TooHigh { max: Price::MAX })
        );
    }

    #[test]
    fn test_price_display() {
        let price = Price::new(Decimal::new(25, 1)).unwrap();
        assert_eq!(price.to_string(), "$2.50");
    }

    #[test]
    fn test_category_labels_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("Hard candy".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(StockStatus::for_stock(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::for_stock(1), StockStatus::Low);
        assert_eq!(StockStatus::for_stock(5), StockStatus::Low);
        assert_eq!(StockStatus::for_stock(6), StockStatus::InStock);
        assert_eq!(StockStatus::OutOfStock.label(), "Out of Stock");
    }

    #[test]
    fn test_product_json_uses_display_labels() {
        let product = Product::new(
            "4",
            ProductDraft {
                name: "Strawberry Bon Bons".into(),
                category: Category::HardCandy,
                price: Price::new(Decimal::new(375, 2)).unwrap(),
                stock: 30,
                description: None,
            },
        );
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["category"], "Hard Candy");
        assert_eq!(json["price"], "3.75");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_deserializing_invalid_price_fails() {
        let json = r#"{"id":"1","name":"Free","category":"Gummies","price":"0","stock":1}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
