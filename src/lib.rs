//! Storefront core for a sweet shop: a filterable catalog, an authoritative
//! inventory, a persisted session and the admin workflow, built as tokio actors.

pub mod actor_framework;
pub mod admin;
pub mod app_system;
pub mod auth;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod inventory;
pub mod messages;
pub mod routes;
pub mod session;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, ShopSystem, Storefront};
pub use config::ShopConfig;
pub use error::ShopError;
