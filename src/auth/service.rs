use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::AuthClient;
use crate::domain::{Credentials, Registration, Role, User};
use crate::messages::{AuthRequest, ServiceResponse};
use super::error::AuthError;

/// Macro for clean error response handling
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

struct Account {
    user: User,
    password: String,
}

/// Account lookup actor. Knows the two demo accounts from the start and keeps
/// any registered since.
pub struct AuthService {
    receiver: mpsc::Receiver<AuthRequest>,
    /// Keyed by normalized email.
    accounts: HashMap<String, Account>,
    next_id: u64,
    latency: Duration,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    pub fn new(buffer_size: usize, latency: Duration) -> (Self, AuthClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let mut service = Self {
            receiver,
            accounts: HashMap::new(),
            next_id: 1,
            latency,
        };
        service.insert_account("Admin User", "admin@sweetshop.com", "admin123", Role::Admin);
        service.insert_account("Customer User", "customer@sweetshop.com", "customer123", Role::Customer);
        let client = AuthClient::new(sender);
        (service, client)
    }

    fn insert_account(&mut self, name: &str, email: &str, password: &str, role: Role) -> User {
        let user = User::new(self.next_id.to_string(), name, email.trim(), role);
        self.next_id += 1;
        self.accounts.insert(
            normalize_email(email),
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        user
    }

    #[instrument(name = "auth_service", skip(self))]
    pub async fn run(mut self) {
        info!(accounts = self.accounts.len(), "AuthService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AuthRequest::Login { credentials, respond_to } => {
                    self.handle_login(credentials, respond_to).await;
                }
                AuthRequest::Register { registration, respond_to } => {
                    self.handle_register(registration, respond_to).await;
                }
                AuthRequest::Shutdown => {
                    info!("AuthService shutting down");
                    break;
                }
                #[cfg(test)]
                AuthRequest::GetAccountCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.accounts.len()));
                }
            }
        }

        info!("AuthService stopped");
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Never logs the password; only the email is recorded on the span.
    #[instrument(fields(email = %credentials.email), skip(self, credentials, respond_to))]
    async fn handle_login(&self, credentials: Credentials, respond_to: ServiceResponse<User, AuthError>) {
        debug!("Processing login request");
        self.simulate_latency().await;

        let result = match self.accounts.get(&normalize_email(&credentials.email)) {
            Some(account) if account.password == credentials.password => {
                info!(user_id = %account.user.id, role = %account.user.role, "Login successful");
                Ok(account.user.clone())
            }
            _ => {
                warn!("Login rejected");
                Err(AuthError::InvalidCredentials)
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(email = %registration.email, username = %registration.username), skip(self, registration, respond_to))]
    async fn handle_register(&mut self, registration: Registration, respond_to: ServiceResponse<User, AuthError>) {
        debug!("Processing register request");
        self.simulate_latency().await;

        if registration.password != registration.confirm_password {
            error!("Validation failed: password confirmation mismatch");
            send_error!(respond_to, AuthError::PasswordMismatch);
        }
        if let Err(message) = validate_registration(&registration) {
            error!(reason = %message, "Validation failed");
            send_error!(respond_to, AuthError::ValidationError(message));
        }

        let key = normalize_email(&registration.email);
        if self.accounts.contains_key(&key) {
            error!("Validation failed: email already registered");
            send_error!(respond_to, AuthError::EmailTaken(registration.email.trim().to_string()));
        }

        let user = self.insert_account(
            registration.username.trim(),
            &registration.email,
            &registration.password,
            Role::Customer,
        );
        info!(user_id = %user.id, "Account registered");
        let _ = respond_to.send(Ok(user));
    }
}

fn validate_registration(registration: &Registration) -> Result<(), String> {
    if registration.username.trim().is_empty() {
        return Err("Username is required".to_string());
    }
    if registration.password.is_empty() {
        return Err("Password is required".to_string());
    }
    match registration.email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err("Email must be a valid address".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> AuthClient {
        let (service, client) = AuthService::new(10, Duration::ZERO);
        tokio::spawn(service.run());
        client
    }

    fn registration(email: &str, password: &str, confirm: &str) -> Registration {
        Registration {
            username: "Sam".into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[tokio::test]
    async fn test_demo_accounts_log_in() -> Result<(), Box<dyn std::error::Error>> {
        let client = start();

        let admin = client.login(Credentials::new("admin@sweetshop.com", "admin123")).await?;
        assert_eq!(admin, User::new("1", "Admin User", "admin@sweetshop.com", Role::Admin));

        let customer = client.login(Credentials::new("customer@sweetshop.com", "customer123")).await?;
        assert_eq!(customer.role, Role::Customer);
        assert_eq!(customer.id, "2");
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let client = start();
        let err = client
            .login(Credentials::new("admin@sweetshop.com", "customer123"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_registration_creates_customer_that_can_log_in() -> Result<(), Box<dyn std::error::Error>> {
        let client = start();
        assert_eq!(client.get_account_count().await?, 2);

        let user = client.register(registration("sam@example.com", "pw", "pw")).await?;
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.name, "Sam");
        assert_eq!(client.get_account_count().await?, 3);

        let again = client.login(Credentials::new("SAM@example.com", "pw")).await?;
        assert_eq!(again, user);
        Ok(())
    }

    #[tokio::test]
    async fn test_registration_rejections() {
        let client = start();

        let err = client.register(registration("new@example.com", "a", "b")).await.unwrap_err();
        assert_eq!(err, AuthError::PasswordMismatch);

        let err = client.register(registration("admin@sweetshop.com", "a", "a")).await.unwrap_err();
        assert_eq!(err, AuthError::EmailTaken("admin@sweetshop.com".into()));

        let err = client.register(registration("not-an-email", "a", "a")).await.unwrap_err();
        assert!(matches!(err, AuthError::ValidationError(_)));

        assert_eq!(client.get_account_count().await.unwrap(), 2);
    }
}
