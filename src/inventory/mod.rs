//! Authoritative product inventory: the one place stock is decremented and restocked.

mod actions;
pub mod entity;
pub mod error;
pub mod seed;

pub use actions::*;
pub use error::*;
pub use seed::demo_catalog;
