use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::CatalogClient;
use crate::domain::{Category, PriceRange, Product};
use crate::messages::{CatalogRequest, ServiceResponse};
use super::error::CatalogError;
use super::state::CatalogState;

/// Hosts one visitor's [`CatalogState`]. Requests are handled one at a time, so a
/// stock check and the decrement that follows it can never interleave with
/// another request.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    state: CatalogState,
}

impl CatalogService {
    pub fn new(buffer_size: usize) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            state: CatalogState::new(),
        };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::Load { products, respond_to } => {
                    self.handle_load(products, respond_to);
                }
                CatalogRequest::SetLoading { loading, respond_to } => {
                    self.state.set_loading(loading);
                    let _ = respond_to.send(Ok(()));
                }
                CatalogRequest::SetError { message, respond_to } => {
                    self.handle_set_error(message, respond_to);
                }
                CatalogRequest::Add { product, respond_to } => {
                    self.handle_add(product, respond_to);
                }
                CatalogRequest::Update { product, respond_to } => {
                    self.handle_update(product, respond_to);
                }
                CatalogRequest::Delete { id, respond_to } => {
                    self.handle_delete(id, respond_to);
                }
                CatalogRequest::Purchase { id, quantity, respond_to } => {
                    self.handle_purchase(id, quantity, respond_to);
                }
                CatalogRequest::SetSearchTerm { term, respond_to } => {
                    self.handle_set_search_term(term, respond_to);
                }
                CatalogRequest::SetCategory { category, respond_to } => {
                    self.handle_set_category(category, respond_to);
                }
                CatalogRequest::SetPriceRange { range, respond_to } => {
                    self.handle_set_price_range(range, respond_to);
                }
                CatalogRequest::ClearFilters { respond_to } => {
                    self.state.clear_filters();
                    debug!("Filters cleared");
                    let _ = respond_to.send(Ok(()));
                }
                CatalogRequest::GetProduct { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.state.get(&id).cloned()));
                }
                CatalogRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
            }
        }

        info!("CatalogService stopped");
    }

    #[instrument(fields(product_count = products.len()), skip(self, products, respond_to))]
    fn handle_load(&mut self, products: Vec<Product>, respond_to: ServiceResponse<(), CatalogError>) {
        self.state.load(products);
        info!(categories = self.state.categories().len(), "Catalog loaded");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_set_error(&mut self, message: String, respond_to: ServiceResponse<(), CatalogError>) {
        warn!("Catalog load failed");
        self.state.set_error(message);
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %product.id, product_name = %product.name), skip(self, product, respond_to))]
    fn handle_add(&mut self, product: Product, respond_to: ServiceResponse<(), CatalogError>) {
        self.state.add(product);
        info!("Product added");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %product.id), skip(self, product, respond_to))]
    fn handle_update(&mut self, product: Product, respond_to: ServiceResponse<(), CatalogError>) {
        let result = self.state.update(product);
        match &result {
            Ok(()) => info!("Product updated"),
            Err(e) => warn!(error = %e, "Product update ignored"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_delete(&mut self, id: String, respond_to: ServiceResponse<(), CatalogError>) {
        self.state.delete(&id);
        info!("Product deleted");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_purchase(&mut self, id: String, quantity: u32, respond_to: ServiceResponse<Product, CatalogError>) {
        let result = self.state.purchase(&id, quantity).cloned();
        match &result {
            Ok(product) => info!(remaining = product.stock, "Purchase applied"),
            Err(e) => warn!(error = %e, "Purchase rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_set_search_term(&mut self, term: String, respond_to: ServiceResponse<(), CatalogError>) {
        self.state.set_search_term(term);
        debug!(matches = self.state.filtered().len(), "Search term set");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_set_category(&mut self, category: Option<Category>, respond_to: ServiceResponse<(), CatalogError>) {
        self.state.set_category(category);
        debug!(matches = self.state.filtered().len(), "Category filter set");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(low = %range.low, high = %range.high), skip(self, range, respond_to))]
    fn handle_set_price_range(&mut self, range: PriceRange, respond_to: ServiceResponse<(), CatalogError>) {
        self.state.set_price_range(range);
        debug!(matches = self.state.filtered().len(), "Price range set");
        let _ = respond_to.send(Ok(()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::demo_catalog;

    #[tokio::test]
    async fn test_catalog_service_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let (service, client) = CatalogService::new(10);
        let handle = tokio::spawn(service.run());

        client.set_loading(true).await?;
        assert!(client.snapshot().await?.is_loading());

        client.load(demo_catalog()?).await?;
        client.set_category(Some(Category::Gummies)).await?;
        let snapshot = client.snapshot().await?;
        assert!(!snapshot.is_loading());
        assert_eq!(snapshot.filtered().len(), 2);

        let product = client.purchase("2".to_string(), 10).await?;
        assert_eq!(product.stock, 40);

        let err = client.purchase("5".to_string(), 1).await.unwrap_err();
        assert_eq!(err, CatalogError::InsufficientStock { requested: 1, available: 0 });

        client.clear_filters().await?;
        let snapshot = client.snapshot().await?;
        assert_eq!(snapshot.filtered(), snapshot.products());

        client.shutdown().await?;
        handle.await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_requests_fail_after_shutdown() {
        let (service, client) = CatalogService::new(10);
        let handle = tokio::spawn(service.run());
        client.shutdown().await.unwrap();
        handle.await.unwrap();

        let err = client.clear_filters().await.unwrap_err();
        assert!(matches!(err, CatalogError::ActorCommunicationError(_)));
    }
}
