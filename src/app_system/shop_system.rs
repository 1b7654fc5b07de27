use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::auth::AuthService;
use crate::catalog::CatalogService;
use crate::clients::{AuthClient, InventoryClient};
use crate::config::{SessionBackend, ShopConfig};
use crate::domain::Product;
use crate::error::ShopError;
use crate::inventory::demo_catalog;
use crate::session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
use super::storefront::Storefront;

/// The shop's long-lived services.
///
/// Starts the inventory and auth actors and hands out one [`Storefront`] per
/// visitor, each with its own catalog actor and session.
pub struct ShopSystem {
    config: ShopConfig,
    inventory_client: InventoryClient,
    auth_client: AuthClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Fails only if the demo catalog cannot be built.
    #[instrument(name = "shop_system_start", skip(config))]
    pub fn new(config: ShopConfig) -> Result<Self, ShopError> {
        // 1. Inventory, the single source of truth for stock
        let seed = if config.seed_catalog { demo_catalog()? } else { Vec::new() };
        let first_free_id = seed
            .iter()
            .filter_map(|product| product.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let product_id_counter = Arc::new(AtomicU64::new(first_free_id));
        let next_product_id = move || product_id_counter.fetch_add(1, Ordering::SeqCst).to_string();

        let seeded = seed.len();
        let (inventory_actor, inventory_resource_client) =
            ResourceActor::<Product>::new(config.channel_capacity, next_product_id);
        let inventory_actor = inventory_actor
            .with_latency(config.inventory_latency)
            .with_items(seed);
        let inventory_client = InventoryClient::new(inventory_resource_client);
        let inventory_handle = tokio::spawn(inventory_actor.run());

        // 2. Auth
        let (auth_service, auth_client) = AuthService::new(config.channel_capacity, config.auth_latency);
        let auth_handle = tokio::spawn(auth_service.run());

        info!(seeded, "Shop system started");
        Ok(Self {
            config,
            inventory_client,
            auth_client,
            handles: vec![inventory_handle, auth_handle],
        })
    }

    pub fn inventory(&self) -> &InventoryClient {
        &self.inventory_client
    }

    /// Opens a storefront whose session lives in the configured backend.
    pub fn open_storefront(&self) -> Storefront {
        let storage: Arc<dyn SessionStorage> = match &self.config.session {
            SessionBackend::File(dir) => Arc::new(FileStorage::new(dir.clone())),
            SessionBackend::Memory => Arc::new(MemoryStorage::new()),
        };
        self.open_storefront_with(storage)
    }

    /// Opens a storefront over an explicit session storage, restoring any user
    /// persisted there.
    pub fn open_storefront_with(&self, storage: Arc<dyn SessionStorage>) -> Storefront {
        let (catalog_service, catalog_client) = CatalogService::new(self.config.channel_capacity);
        let catalog_handle = tokio::spawn(catalog_service.run());
        let session = SessionStore::load_from_storage(storage);
        Storefront::new(
            catalog_client,
            catalog_handle,
            self.inventory_client.clone(),
            self.auth_client.clone(),
            session,
        )
    }

    /// Stops the inventory and auth actors. Storefronts still open afterwards
    /// get `ActorCommunicationError` from every inventory or auth call.
    ///
    /// # Errors
    ///
    /// Returns an error if a service task panicked.
    pub async fn shutdown(self) -> Result<(), ShopError> {
        info!("Shutting down system...");
        if let Err(e) = self.inventory_client.shutdown().await {
            error!(error = %e, "Inventory already stopped");
        }
        if let Err(e) = self.auth_client.shutdown().await {
            error!(error = %e, "Auth service already stopped");
        }
        drop(self.auth_client);
        drop(self.inventory_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(ShopError::ActorCommunicationError(format!("Actor task failed: {e:?}")));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
