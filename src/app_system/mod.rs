//! System orchestration, startup, and shutdown logic.

pub mod shop_system;
pub mod storefront;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use shop_system::*;
pub use storefront::*;
