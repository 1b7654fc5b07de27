use tracing::{info, instrument, warn};

use crate::admin::{ProductCard, ProductEditor, RestockDialog};
use crate::catalog::CatalogError;
use crate::clients::{AuthClient, CatalogClient, InventoryClient};
use crate::domain::{Credentials, Product, Registration, User};
use crate::error::ShopError;
use crate::inventory::InventoryError;
use crate::routes::{authorize, Access, Route};
use crate::session::SessionStore;

/// One visitor's view of the shop.
///
/// Owns the visitor's catalog actor and session. Stock changes always go through
/// the inventory first; the local catalog only ever mirrors what it returned.
pub struct Storefront {
    catalog: CatalogClient,
    catalog_handle: tokio::task::JoinHandle<()>,
    inventory: InventoryClient,
    auth: AuthClient,
    session: SessionStore,
    route: Route,
}

impl Storefront {
    pub(crate) fn new(
        catalog: CatalogClient,
        catalog_handle: tokio::task::JoinHandle<()>,
        inventory: InventoryClient,
        auth: AuthClient,
        session: SessionStore,
    ) -> Self {
        Self {
            catalog,
            catalog_handle,
            inventory,
            auth,
            session,
            route: Route::Home,
        }
    }

    /// Filter commands and snapshots go straight to the catalog.
    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn route(&self) -> Route {
        self.route
    }

    // --- Navigation ---

    /// Moves to `path`, or to wherever the gate redirects.
    #[instrument(skip(self))]
    pub fn navigate(&mut self, path: &str) -> Route {
        let requested = Route::from_path(path);
        self.route = match authorize(requested, self.session.current_user()) {
            Access::Granted => requested,
            Access::Redirect(to) => {
                info!(from = %requested, to = %to, "Redirected");
                to
            }
        };
        self.route
    }

    fn require_admin(&self) -> Result<(), ShopError> {
        match authorize(Route::Admin, self.session.current_user()) {
            Access::Granted => Ok(()),
            Access::Redirect(redirect) => {
                warn!(redirect = %redirect, "Admin operation refused");
                Err(ShopError::Unauthorized {
                    route: Route::Admin,
                    redirect,
                })
            }
        }
    }

    // --- Catalog ---

    /// Fetches the product list into the catalog. A failed fetch is recorded on
    /// the catalog's error field and also returned.
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) -> Result<(), ShopError> {
        self.catalog.set_loading(true).await?;
        match self.inventory.list_products().await {
            Ok(products) => {
                self.catalog.load(products).await?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                self.catalog.set_error(format!("Failed to load sweets: {e}")).await?;
                Err(e.into())
            }
        }
    }

    /// Buys `quantity` of a product for the signed-in user.
    #[instrument(skip(self))]
    pub async fn purchase(&self, id: &str, quantity: u32) -> Result<Product, ShopError> {
        if !self.session.is_authenticated() {
            warn!("Purchase refused: not signed in");
            return Err(ShopError::NotSignedIn);
        }
        match self.inventory.purchase(id.to_string(), quantity).await {
            Ok(product) => {
                info!(remaining = product.stock, badge = product.stock_status().label(), "Purchase confirmed");
                self.mirror(product.clone()).await?;
                Ok(product)
            }
            Err(e) => {
                warn!(error = %e, "Purchase failed");
                self.reconcile(id, &e).await?;
                match e {
                    InventoryError::InsufficientStock { available: 0, .. } => Err(ShopError::OutOfStock),
                    e => Err(e.into()),
                }
            }
        }
    }

    /// Replaces the local copy of a product with the inventory's.
    async fn mirror(&self, product: Product) -> Result<(), ShopError> {
        match self.catalog.update(product).await {
            // Catalog not loaded yet; the next load picks the change up.
            Err(CatalogError::NotFound(id)) => {
                info!(product_id = %id, "No local copy to refresh");
                Ok(())
            }
            other => other.map_err(ShopError::from),
        }
    }

    /// Brings the local copy in line with what a failed inventory call revealed.
    async fn reconcile(&self, id: &str, error: &InventoryError) -> Result<(), ShopError> {
        match error {
            InventoryError::InsufficientStock { available, .. } => {
                if let Some(mut local) = self.catalog.get_product(id.to_string()).await? {
                    local.stock = *available;
                    self.mirror(local).await?;
                }
            }
            InventoryError::NotFound(_) => self.catalog.delete(id.to_string()).await?,
            _ => {}
        }
        Ok(())
    }

    // --- Session ---

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&mut self, credentials: Credentials) -> Result<User, ShopError> {
        let user = self.auth.login(credentials).await?;
        self.session.login(user.clone());
        self.route = Route::Dashboard;
        Ok(user)
    }

    /// Creates a customer account and signs it in.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&mut self, registration: Registration) -> Result<User, ShopError> {
        let user = self.auth.register(registration).await?;
        self.session.login(user.clone());
        self.route = Route::Dashboard;
        Ok(user)
    }

    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        self.session.logout();
        self.route = Route::Home;
    }

    // --- Admin ---

    /// Submits an add-product form. The editor is back in `Idle` afterwards
    /// whatever the outcome.
    #[instrument(skip(self, editor))]
    pub async fn add_product(&self, editor: &mut ProductEditor) -> Result<Product, ShopError> {
        self.require_admin()?;
        let draft = editor.begin_submit()?;
        let result = async {
            let product = self.inventory.create_product(draft).await?;
            self.catalog.add(product.clone()).await?;
            Ok::<_, ShopError>(product)
        }
        .await;
        editor.finish_submit();

        match &result {
            Ok(product) => info!(product_id = %product.id, name = %product.name, "Product added"),
            Err(e) => warn!(error = %e, "Add product failed"),
        }
        result
    }

    /// Submits an edit form for product `id`. The stock is only overwritten if
    /// the admin changed the stock field; otherwise the inventory keeps its level.
    #[instrument(skip(self, editor))]
    pub async fn edit_product(&self, id: &str, editor: &mut ProductEditor) -> Result<Product, ShopError> {
        self.require_admin()?;
        let stock_edited = editor.stock_edited();
        let draft = editor.begin_submit()?;
        let result = async {
            let product = if stock_edited {
                self.inventory.update_product(id.to_string(), draft).await?
            } else {
                self.inventory.update_details(id.to_string(), draft).await?
            };
            self.mirror(product.clone()).await?;
            Ok::<_, ShopError>(product)
        }
        .await;
        editor.finish_submit();

        match &result {
            Ok(product) => info!(name = %product.name, stock_edited, "Product updated"),
            Err(e) => warn!(error = %e, "Edit product failed"),
        }
        result
    }

    /// Carries out a confirmed delete. The card must be in `ConfirmingDelete`;
    /// it ends in `Removed`, or back in `Idle` if the delete failed.
    #[instrument(skip(self, card), fields(product_id = %card.product_id()))]
    pub async fn delete_product(&self, card: &mut ProductCard) -> Result<(), ShopError> {
        self.require_admin()?;
        card.confirm_delete()?;
        let id = card.product_id().to_string();
        let result = async {
            self.inventory.delete_product(id.clone()).await?;
            self.catalog.delete(id).await?;
            Ok::<_, ShopError>(())
        }
        .await;
        card.finish_delete(result.is_ok())?;

        match &result {
            Ok(()) => info!("Product deleted"),
            Err(e) => warn!(error = %e, "Delete product failed"),
        }
        result
    }

    /// Submits a restock dialog. An invalid quantity leaves the dialog open.
    #[instrument(skip(self, dialog), fields(product_id = %dialog.product_id()))]
    pub async fn restock(&self, dialog: &mut RestockDialog) -> Result<Product, ShopError> {
        self.require_admin()?;
        let quantity = dialog.submit()?;
        let result = async {
            let product = self.inventory.restock(dialog.product_id().to_string(), quantity).await?;
            self.mirror(product.clone()).await?;
            Ok::<_, ShopError>(product)
        }
        .await;

        match &result {
            Ok(product) => info!(
                added = quantity,
                stock = product.stock,
                badge = product.stock_status().label(),
                "Product restocked"
            ),
            Err(e) => warn!(error = %e, "Restock failed"),
        }
        result
    }

    /// Stops this visitor's catalog actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog task panicked.
    pub async fn close(self) -> Result<(), ShopError> {
        if let Err(e) = self.catalog.shutdown().await {
            warn!(error = %e, "Catalog already stopped");
        }
        self.catalog_handle
            .await
            .map_err(|e| ShopError::ActorCommunicationError(format!("Catalog task failed: {e:?}")))
    }
}
