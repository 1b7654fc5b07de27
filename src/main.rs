use tracing::{error, info, Instrument};

use sweet_shop::admin::{ProductEditor, ProductForm, RestockDialog};
use sweet_shop::domain::Credentials;
use sweet_shop::{setup_tracing, ShopConfig, ShopError, ShopSystem};

#[tokio::main]
async fn main() -> Result<(), ShopError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ShopConfig::from_env()?;
    info!(?config, "Starting sweet shop");

    let system = ShopSystem::new(config)?;
    let mut storefront = system.open_storefront();

    storefront.load_catalog().await?;
    let snapshot = storefront.catalog().snapshot().await?;
    info!(
        products = snapshot.products().len(),
        categories = snapshot.categories().len(),
        "Catalog ready"
    );
    for product in snapshot.products() {
        info!(product = %product.name, price = %product.price, badge = product.stock_status().label(), "Listed");
    }

    storefront.catalog().set_search_term("gummy".to_string()).await?;
    let searched = storefront.catalog().snapshot().await?;
    info!(
        filtering = searched.criteria().is_active(),
        matches = searched.filtered().len(),
        "Searched for gummy"
    );
    storefront.catalog().clear_filters().await?;

    let span = tracing::info_span!("customer_visit");
    async {
        storefront
            .login(Credentials::new("customer@sweetshop.com", "customer123"))
            .await?;
        let landed = storefront.navigate("/admin");
        info!(route = %landed, "Customer tried the admin page");

        match storefront.purchase("2", 3).await {
            Ok(product) => info!(product = %product.name, remaining = product.stock, "Purchased"),
            Err(e) => error!(error = %e, "Purchase failed"),
        }
        if let Err(e) = storefront.purchase("5", 1).await {
            info!(error = %e, "Sour Worms stay sold out");
        }
        storefront.logout();
        Ok::<_, ShopError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("admin_visit");
    async {
        storefront
            .login(Credentials::new("admin@sweetshop.com", "admin123"))
            .await?;
        storefront.navigate("/admin");

        let mut editor = ProductEditor::for_new(ProductForm {
            name: "Sherbet Lemons".into(),
            category: "Hard Candy".into(),
            price: "2.75".into(),
            stock: "40".into(),
            description: "Tangy boiled sweets with a fizzing centre".into(),
        });
        let added = storefront.add_product(&mut editor).await?;
        info!(product_id = %added.id, "Added new sweet");

        let mut dialog = RestockDialog::open("5");
        dialog.set_quantity("30");
        let restocked = storefront.restock(&mut dialog).await?;
        info!(product = %restocked.name, stock = restocked.stock, "Restocked");

        storefront.logout();
        Ok::<_, ShopError>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully
    storefront.close().await?;
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
