//! Admin inventory workflow: form validation and the per-card and per-dialog
//! state machines the admin page drives.

pub mod card;
pub mod fields;
pub mod form;
pub mod restock;

pub use card::{CardState, InvalidTransition, ProductCard};
pub use fields::{Field, FieldErrors};
pub use form::{FormPhase, FormRejection, ProductEditor, ProductForm};
pub use restock::RestockDialog;
