use thiserror::Error;

/// Errors that can occur during login and registration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("An account already exists for {0}")]
    EmailTaken(String),
    #[error("Registration validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
