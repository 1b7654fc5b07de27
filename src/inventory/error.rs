use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Stock limit exceeded: {stock} + {added} is over {max}")]
    StockLimit { stock: u32, added: u32, max: u32 },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<InventoryError>> for InventoryError {
    fn from(err: FrameworkError<InventoryError>) -> Self {
        match err {
            FrameworkError::NotFound(id) => Self::NotFound(id),
            FrameworkError::Entity(e) => e,
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                Self::ActorCommunicationError(err.to_string())
            }
        }
    }
}
