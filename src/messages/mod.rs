use tokio::sync::oneshot;

use crate::auth::AuthError;
use crate::catalog::{CatalogError, CatalogState};
use crate::domain::{Category, Credentials, PriceRange, Product, Registration, User};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant includes parameters
/// and a oneshot channel for responses. Field names match the client method
/// parameters generated by `client_method!`.

#[derive(Debug)]
pub enum CatalogRequest {
    Load {
        products: Vec<Product>,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    SetLoading {
        loading: bool,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    SetError {
        message: String,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    Add {
        product: Product,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    Update {
        product: Product,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    Delete {
        id: String,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    Purchase {
        id: String,
        quantity: u32,
        respond_to: ServiceResponse<Product, CatalogError>,
    },
    SetSearchTerm {
        term: String,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    SetCategory {
        category: Option<Category>,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    SetPriceRange {
        range: PriceRange,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    ClearFilters {
        respond_to: ServiceResponse<(), CatalogError>,
    },
    GetProduct {
        id: String,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    },
    Snapshot {
        respond_to: ServiceResponse<CatalogState, CatalogError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum AuthRequest {
    Login {
        credentials: Credentials,
        respond_to: ServiceResponse<User, AuthError>,
    },
    Register {
        registration: Registration,
        respond_to: ServiceResponse<User, AuthError>,
    },
    Shutdown,
    #[cfg(test)]
    GetAccountCount {
        respond_to: ServiceResponse<usize, AuthError>,
    },
}
