use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::catalog::{CatalogError, CatalogState};
use crate::domain::{Category, PriceRange, Product};
use crate::messages::CatalogRequest;

/// Client for a [`crate::catalog::CatalogService`].
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    /// Manual methods for special cases (no response needed)
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|_| CatalogError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CatalogClient => fn load(products: Vec<Product>) -> () as CatalogRequest::Load, Error = CatalogError);
client_method!(CatalogClient => fn set_loading(loading: bool) -> () as CatalogRequest::SetLoading, Error = CatalogError);
client_method!(CatalogClient => fn set_error(message: String) -> () as CatalogRequest::SetError, Error = CatalogError);
client_method!(CatalogClient => fn add(product: Product) -> () as CatalogRequest::Add, Error = CatalogError);
client_method!(CatalogClient => fn update(product: Product) -> () as CatalogRequest::Update, Error = CatalogError);
client_method!(CatalogClient => fn delete(id: String) -> () as CatalogRequest::Delete, Error = CatalogError);
client_method!(CatalogClient => fn purchase(id: String, quantity: u32) -> Product as CatalogRequest::Purchase, Error = CatalogError);
client_method!(CatalogClient => fn set_search_term(term: String) -> () as CatalogRequest::SetSearchTerm, Error = CatalogError);
client_method!(CatalogClient => fn set_category(category: Option<Category>) -> () as CatalogRequest::SetCategory, Error = CatalogError);
client_method!(CatalogClient => fn set_price_range(range: PriceRange) -> () as CatalogRequest::SetPriceRange, Error = CatalogError);
client_method!(CatalogClient => fn clear_filters() -> () as CatalogRequest::ClearFilters, Error = CatalogError);
client_method!(CatalogClient => fn get_product(id: String) -> Option<Product> as CatalogRequest::GetProduct, Error = CatalogError);
client_method!(CatalogClient => fn snapshot() -> CatalogState as CatalogRequest::Snapshot, Error = CatalogError);
