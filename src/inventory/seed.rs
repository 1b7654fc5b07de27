use rust_decimal::Decimal;

use crate::domain::{Category, Price, PriceError, Product, ProductDraft};

/// The demonstration sweets the shop opens with.
///
/// # Errors
///
/// Returns [`PriceError`] only if one of the listed prices is out of range.
pub fn demo_catalog() -> Result<Vec<Product>, PriceError> {
    [
        ("1", "Rainbow Lollipops", Category::Lollipops, 250, 25, "Colorful swirl lollipops with fruity flavors"),
        ("2", "Gummy Bears", Category::Gummies, 499, 50, "Classic chewy gummy bears in assorted flavors"),
        ("3", "Chocolate Truffles", Category::Chocolate, 1299, 15, "Premium dark chocolate truffles with cream filling"),
        ("4", "Strawberry Bon Bons", Category::HardCandy, 375, 30, "Traditional strawberry flavored hard candies"),
        ("5", "Sour Worms", Category::Gummies, 550, 0, "Tangy sour gummy worms that pack a punch"),
        ("6", "Cotton Candy", Category::Specialty, 600, 20, "Fluffy spun sugar in pink and blue"),
    ]
    .into_iter()
    .map(|(id, name, category, cents, stock, description)| -> Result<Product, PriceError> {
        Ok(Product::new(
            id,
            ProductDraft {
                name: name.to_string(),
                category,
                price: Price::new(Decimal::new(cents, 2))?,
                stock,
                description: Some(description.to_string()),
            },
        ))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog() {
        let catalog = demo_catalog().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog[4].name, "Sour Worms");
        assert_eq!(catalog[4].stock, 0);
        assert_eq!(catalog[1].price.amount(), Decimal::new(499, 2));
    }
}
