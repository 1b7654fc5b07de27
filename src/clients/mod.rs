//! Cloneable handles for talking to the shop's actors.

#[macro_use]
mod macros;

mod auth_client;
mod catalog_client;
mod inventory_client;

pub use auth_client::AuthClient;
pub use catalog_client::CatalogClient;
pub use inventory_client::InventoryClient;
