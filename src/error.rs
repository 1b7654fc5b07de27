use thiserror::Error;

use crate::admin::{FieldErrors, FormRejection, InvalidTransition};
use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::domain::PriceError;
use crate::inventory::InventoryError;
use crate::routes::Route;

/// Everything a storefront intent can fail with.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Please login to continue")]
    NotSignedIn,
    #[error("Access to {route} denied, redirected to {redirect}")]
    Unauthorized { route: Route, redirect: Route },
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),
    #[error("A submission is already in progress")]
    Busy,
    #[error("This sweet is out of stock!")]
    OutOfStock,
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    InvalidPrice(#[from] PriceError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FieldErrors> for ShopError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<FormRejection> for ShopError {
    fn from(rejection: FormRejection) -> Self {
        match rejection {
            FormRejection::Invalid(errors) => Self::Validation(errors),
            FormRejection::Busy => Self::Busy,
        }
    }
}
