use crate::actor_framework::Entity;
use crate::domain::{Product, ProductDraft, MAX_STOCK};
use super::actions::{ProductAction, ProductActionResult, ProductPatch};
use super::error::InventoryError;

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductDraft;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = InventoryError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from a validated draft.
    fn from_create_params(id: String, params: ProductDraft) -> Result<Self, InventoryError> {
        Ok(Self::new(id, params))
    }

    /// Replaces every editable field, stock included unless the patch keeps it.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), InventoryError> {
        let stock = self.stock;
        self.apply(patch.draft);
        if patch.keep_stock {
            self.stock = stock;
        }
        Ok(())
    }

    /// Handles stock actions.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `Purchase(quantity)`: Compare-and-decrement
    /// - `Restock(quantity)`: Increment, bounded by `MAX_STOCK`
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, InventoryError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::Purchase(0) | ProductAction::Restock(0) => {
                Err(InventoryError::InvalidQuantity(0))
            }
            ProductAction::Purchase(quantity) => {
                if quantity > self.stock {
                    return Err(InventoryError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::Purchased(self.clone()))
            }
            ProductAction::Restock(quantity) => {
                let restocked = self
                    .stock
                    .checked_add(quantity)
                    .filter(|total| *total <= MAX_STOCK)
                    .ok_or(InventoryError::StockLimit {
                        stock: self.stock,
                        added: quantity,
                        max: MAX_STOCK,
                    })?;
                self.stock = restocked;
                Ok(ProductActionResult::Restocked(self.clone()))
            }
        }
    }
}
