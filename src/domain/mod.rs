pub mod filter;
pub mod product;
pub mod user;

pub use filter::*;
pub use product::*;
pub use user::*;
