//! The signed-in user, persisted across restarts under a single storage key.

pub mod error;
pub mod storage;
pub mod store;

pub use error::*;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{SessionStore, SESSION_KEY};
