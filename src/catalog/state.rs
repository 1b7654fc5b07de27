use crate::domain::{Category, FilterCriteria, PriceRange, Product};
use super::error::CatalogError;

/// Fields computed from the product list and the filter criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedView {
    /// Products matching every criterion, in catalog order.
    pub filtered: Vec<Product>,
    /// Distinct categories present in the catalog, in first-appearance order.
    pub categories: Vec<Category>,
}

/// Computes the derived view. Every mutating operation on [`CatalogState`] ends
/// by calling this, so the derived fields can never drift from canonical state.
#[must_use]
pub fn derive(products: &[Product], criteria: &FilterCriteria) -> DerivedView {
    let filtered = products
        .iter()
        .filter(|product| criteria.matches(product))
        .cloned()
        .collect();

    let mut categories: Vec<Category> = Vec::new();
    for product in products {
        if !categories.contains(&product.category) {
            categories.push(product.category);
        }
    }

    DerivedView { filtered, categories }
}

/// Canonical catalog state plus its derived view.
///
/// Fields are private; all changes go through the methods below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    products: Vec<Product>,
    criteria: FilterCriteria,
    view: DerivedView,
    is_loading: bool,
    error: Option<String>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filtered(&self) -> &[Product] {
        &self.view.filtered
    }

    pub fn categories(&self) -> &[Category] {
        &self.view.categories
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    // --- Load lifecycle ---

    /// Replaces the full product list and clears the loading and error flags.
    pub fn load(&mut self, products: Vec<Product>) {
        self.products = products;
        self.is_loading = false;
        self.error = None;
        self.refresh();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Records a failed load. The product list is left as it was.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.is_loading = false;
    }

    // --- Product mutations ---

    pub fn add(&mut self, product: Product) {
        self.products.push(product);
        self.refresh();
    }

    /// Replaces the product with the same ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has that ID; nothing changes.
    pub fn update(&mut self, product: Product) -> Result<(), CatalogError> {
        let slot = self
            .products
            .iter_mut()
            .find(|existing| existing.id == product.id)
            .ok_or_else(|| CatalogError::NotFound(product.id.clone()))?;
        *slot = product;
        self.refresh();
        Ok(())
    }

    /// Removes the product with the given ID. Unknown IDs are ignored.
    pub fn delete(&mut self, id: &str) {
        self.products.retain(|product| product.id != id);
        self.refresh();
    }

    /// Decrements stock by exactly `quantity` if at least that much is on hand.
    ///
    /// # Errors
    ///
    /// Stock is left unchanged and an error returned if the product is unknown,
    /// the quantity is zero, or the quantity exceeds current stock.
    pub fn purchase(&mut self, id: &str, quantity: u32) -> Result<&Product, CatalogError> {
        if quantity == 0 {
            return Err(CatalogError::InvalidQuantity(quantity));
        }
        let index = self
            .products
            .iter()
            .position(|product| product.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let available = self.products[index].stock;
        if quantity > available {
            return Err(CatalogError::InsufficientStock { requested: quantity, available });
        }
        self.products[index].stock = available - quantity;
        self.refresh();
        Ok(&self.products[index])
    }

    // --- Filter criteria ---

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.refresh();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.criteria.category = category;
        self.refresh();
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.criteria.price_range = range;
        self.refresh();
    }

    /// Resets every criterion. The default criteria admit every valid product, so
    /// the derived view becomes the full list.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.view = derive(&self.products, &self.criteria);
    }
}
