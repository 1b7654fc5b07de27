//! Mock credential checking and registration.
//!
//! Passwords are held in memory in plain text and no token is issued. This is a
//! stand-in for a real identity provider, not an implementation of one.

pub mod error;
pub mod service;

pub use error::*;
pub use service::AuthService;
