//! Client-side catalog store: the product list, filter criteria and the derived view.

pub mod error;
pub mod service;
pub mod state;

pub use error::*;
pub use service::CatalogService;
pub use state::{derive, CatalogState, DerivedView};
