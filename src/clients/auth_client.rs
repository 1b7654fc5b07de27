use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::auth::AuthError;
use crate::domain::{Credentials, Registration, User};
use crate::messages::AuthRequest;

/// Client for the [`crate::auth::AuthService`].
#[derive(Clone)]
pub struct AuthClient {
    sender: mpsc::Sender<AuthRequest>,
}

impl AuthClient {
    pub fn new(sender: mpsc::Sender<AuthRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), AuthError> {
        debug!("Sending shutdown request");
        self.sender
            .send(AuthRequest::Shutdown)
            .await
            .map_err(|_| AuthError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(AuthClient => fn login(credentials: Credentials) -> User as AuthRequest::Login, Error = AuthError);
client_method!(AuthClient => fn register(registration: Registration) -> User as AuthRequest::Register, Error = AuthError);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(AuthClient => fn get_account_count() -> usize as AuthRequest::GetAccountCount, Error = AuthError);
