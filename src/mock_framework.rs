//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_list`] or [`expect_action`] to answer requests by hand.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};

/// Creates a mock client and a receiver for asserting requests.
///
/// Nothing answers the client until the test pulls the request off `receiver`
/// and sends a reply, so failures and odd responses can be staged exactly.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Response<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Response<Vec<T>, T::Error>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::clients::InventoryClient;
    use crate::domain::Product;
    use crate::inventory::{demo_catalog, InventoryError, ProductAction, ProductActionResult};

    #[tokio::test]
    async fn test_mock_inventory_create() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = InventoryClient::new(inner);
        let draft = demo_catalog().unwrap()[0].to_draft();

        let create_task = tokio::spawn({
            let draft = draft.clone();
            async move { client.create_product(draft).await }
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params, draft);
        responder.send(Ok("42".to_string())).unwrap();

        let product = create_task.await.unwrap().unwrap();
        assert_eq!(product, Product::new("42", draft));
    }

    #[tokio::test]
    async fn test_mock_inventory_purchase_failure() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = InventoryClient::new(inner);

        let purchase_task = tokio::spawn(async move { client.purchase("3".into(), 4).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, "3");
        assert!(matches!(action, ProductAction::Purchase(4)));
        responder
            .send(Err(FrameworkError::Entity(InventoryError::InsufficientStock {
                requested: 4,
                available: 1,
            })))
            .unwrap();

        let err = purchase_task.await.unwrap().unwrap_err();
        assert_eq!(err, InventoryError::InsufficientStock { requested: 4, available: 1 });
    }

    #[tokio::test]
    async fn test_mock_inventory_mismatched_result() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = InventoryClient::new(inner);

        let task = tokio::spawn(async move { client.restock("3".into(), 4).await });
        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder.send(Ok(ProductActionResult::StockLevel(9))).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, InventoryError::ActorCommunicationError(_)));
    }
}
