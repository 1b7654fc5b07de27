use crate::domain::{Product, ProductDraft};

/// Custom actions for Product entities.
///
/// These are the stock operations that must be decided by the inventory itself
/// rather than by a client holding a possibly stale copy.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Takes `quantity` units out of stock.
    ///
    /// # Errors
    /// Fails without touching stock if the quantity is zero or exceeds what is available.
    Purchase(u32),
    /// Adds `quantity` units to stock.
    ///
    /// # Errors
    /// Fails if the quantity is zero or the result would exceed [`crate::domain::MAX_STOCK`].
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    StockLevel(u32),
    /// The product as it stands after the purchase.
    Purchased(Product),
    /// The product as it stands after the restock.
    Restocked(Product),
}

/// Edit of a product's record.
///
/// With `keep_stock` the draft's stock is ignored and the inventory's current
/// level stays, so an edit made from an older copy cannot undo purchases.
#[derive(Debug, Clone)]
pub struct ProductPatch {
    pub draft: ProductDraft,
    pub keep_stock: bool,
}
