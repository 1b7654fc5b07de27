use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductDraft};
use crate::inventory::{InventoryError, ProductAction, ProductActionResult, ProductPatch};

/// Client for the authoritative inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(InventoryClient, Product, InventoryError, product);

impl InventoryClient {
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, InventoryError> {
        debug!("Sending request");
        self.inner.list().await.map_err(InventoryError::from)
    }

    /// Creates a product and returns it with its assigned ID.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, InventoryError> {
        debug!("Sending request");
        let id = self.inner.create(draft.clone()).await.map_err(InventoryError::from)?;
        Ok(Product::new(id, draft))
    }

    /// Replaces the whole record, stock included.
    #[instrument(skip(self, draft))]
    pub async fn update_product(&self, id: String, draft: ProductDraft) -> Result<Product, InventoryError> {
        debug!("Sending request");
        let patch = ProductPatch { draft, keep_stock: false };
        self.inner.update(id, patch).await.map_err(InventoryError::from)
    }

    /// Replaces everything but the stock, which keeps the inventory's current level.
    #[instrument(skip(self, draft))]
    pub async fn update_details(&self, id: String, draft: ProductDraft) -> Result<Product, InventoryError> {
        debug!("Sending request");
        let patch = ProductPatch { draft, keep_stock: true };
        self.inner.update(id, patch).await.map_err(InventoryError::from)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, InventoryError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(level) => Ok(level),
            other => Err(unexpected(&other)),
        }
    }

    /// Compare-and-decrement on the authoritative stock.
    #[instrument(skip(self))]
    pub async fn purchase(&self, id: String, quantity: u32) -> Result<Product, InventoryError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::Purchase(quantity)).await? {
            ProductActionResult::Purchased(product) => Ok(product),
            other => Err(unexpected(&other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn restock(&self, id: String, quantity: u32) -> Result<Product, InventoryError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::Restock(quantity)).await? {
            ProductActionResult::Restocked(product) => Ok(product),
            other => Err(unexpected(&other)),
        }
    }

    /// Stops the inventory actor even if storefronts still hold clients.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), InventoryError> {
        debug!("Sending shutdown");
        self.inner.shutdown().await.map_err(InventoryError::from)
    }
}

fn unexpected(result: &ProductActionResult) -> InventoryError {
    InventoryError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::domain::Price;
    use crate::inventory::demo_catalog;
    use rust_decimal::Decimal;

    fn start() -> InventoryClient {
        let (actor, inner) = ResourceActor::<Product>::new(10, || "7".to_string());
        tokio::spawn(actor.with_items(demo_catalog().unwrap()).run());
        InventoryClient::new(inner)
    }

    #[tokio::test]
    async fn test_purchase_and_restock_against_live_actor() {
        let client = start();

        let product = client.purchase("1".into(), 5).await.unwrap();
        assert_eq!(product.stock, 20);

        let err = client.purchase("5".into(), 1).await.unwrap_err();
        assert_eq!(err, InventoryError::InsufficientStock { requested: 1, available: 0 });

        let product = client.restock("5".into(), 12).await.unwrap();
        assert_eq!(product.stock, 12);
        assert_eq!(client.check_stock("5".into()).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_unknown_product_maps_to_not_found() {
        let client = start();
        let err = client.purchase("404".into(), 1).await.unwrap_err();
        assert_eq!(err, InventoryError::NotFound("404".into()));

        let err = client.delete_product("404".into()).await.unwrap_err();
        assert_eq!(err, InventoryError::NotFound("404".into()));
        assert_eq!(client.get_product("404".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let client = start();
        let mut draft = demo_catalog().unwrap()[0].to_draft();
        draft.name = "Fizz Whizz".into();

        let created = client.create_product(draft.clone()).await.unwrap();
        assert_eq!(created.id, "7");
        assert_eq!(client.list_products().await.unwrap().len(), 7);

        draft.stock = 3;
        let updated = client.update_product("7".into(), draft.clone()).await.unwrap();
        assert_eq!(updated.stock, 3);

        client.purchase("7".into(), 1).await.unwrap();
        draft.price = Price::new(Decimal::new(199, 2)).unwrap();
        let updated = client.update_details("7".into(), draft).await.unwrap();
        assert_eq!(updated.stock, 2);
        assert_eq!(updated.price, Price::new(Decimal::new(199, 2)).unwrap());

        client.delete_product("7".into()).await.unwrap();
        assert_eq!(client.list_products().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_shutdown_with_clones_still_held() {
        let (actor, inner) = ResourceActor::<Product>::new(10, || "7".to_string());
        let handle = tokio::spawn(actor.run());
        let client = InventoryClient::new(inner);
        let held = client.clone();

        client.shutdown().await.unwrap();
        handle.await.unwrap();

        let err = held.list_products().await.unwrap_err();
        assert!(matches!(err, InventoryError::ActorCommunicationError(_)));
    }
}
