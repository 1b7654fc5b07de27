use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::User;
use super::error::SessionError;
use super::storage::SessionStorage;

/// Storage key the current user is persisted under.
pub const SESSION_KEY: &str = "sweet_shop.current_user";

/// Holds the current user, if any, mirrored into [`SessionStorage`].
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    current: Option<User>,
}

impl SessionStore {
    /// Restores the session persisted in `storage`.
    ///
    /// A missing, unreadable or corrupt record yields an anonymous session.
    #[instrument(skip(storage))]
    pub fn load_from_storage(storage: Arc<dyn SessionStorage>) -> Self {
        let current = match storage.get(SESSION_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<User>(&json) {
                Ok(user) => {
                    info!(user_id = %user.id, role = %user.role, "Session restored");
                    Some(user)
                }
                Err(e) => {
                    warn!(error = %e, "Discarding corrupt session record");
                    None
                }
            },
            Ok(None) => {
                debug!("No stored session");
                None
            }
            Err(e) => {
                warn!(error = %e, "Session storage unreadable");
                None
            }
        };
        Self { storage, current }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(User::is_admin)
    }

    /// Replaces the current user and persists it.
    #[instrument(fields(user_id = %user.id), skip(self, user))]
    pub fn login(&mut self, user: User) {
        if let Err(e) = self.persist(&user) {
            warn!(error = %e, "Session not persisted");
        }
        info!("Signed in");
        self.current = Some(user);
    }

    /// Clears the current user and the persisted record.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            warn!(error = %e, "Stored session not cleared");
        }
        info!("Signed out");
        self.current = None;
    }

    fn persist(&self, user: &User) -> Result<(), SessionError> {
        let json = serde_json::to_string(user)?;
        self.storage.set(SESSION_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::session::{FileStorage, MemoryStorage};

    fn admin() -> User {
        User::new("1", "Admin User", "admin@sweetshop.com", Role::Admin)
    }

    #[test]
    fn test_empty_storage_yields_anonymous_session() {
        let store = SessionStore::load_from_storage(Arc::new(MemoryStorage::new()));
        assert!(store.current_user().is_none());
        assert!(!store.is_authenticated());
        assert!(!store.is_admin());
    }

    #[test]
    fn test_stored_user_is_reinstated_exactly() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(SESSION_KEY, &serde_json::to_string(&admin()).unwrap()).unwrap();

        let store = SessionStore::load_from_storage(storage);
        assert_eq!(store.current_user(), Some(&admin()));
        assert!(store.is_admin());
    }

    #[test]
    fn test_corrupt_record_yields_anonymous_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(SESSION_KEY, "{\"id\": 7").unwrap();
        assert!(SessionStore::load_from_storage(storage.clone()).current_user().is_none());

        storage.set(SESSION_KEY, r#"{"id":"1","name":"A","email":"a@b.c","role":"superuser"}"#).unwrap();
        assert!(SessionStore::load_from_storage(storage).current_user().is_none());
    }

    #[test]
    fn test_login_persists_and_logout_clears() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        let mut store = SessionStore::load_from_storage(storage.clone());

        store.login(admin());
        assert_eq!(store.current_user(), Some(&admin()));
        let restored = SessionStore::load_from_storage(storage.clone());
        assert_eq!(restored.current_user(), Some(&admin()));

        store.logout();
        assert!(store.current_user().is_none());
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
        assert!(SessionStore::load_from_storage(storage).current_user().is_none());
    }

    #[test]
    fn test_session_survives_restart_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let customer = User::new("2", "Customer User", "customer@sweetshop.com", Role::Customer);

        let mut store = SessionStore::load_from_storage(Arc::new(FileStorage::new(dir.path())));
        store.login(customer.clone());
        drop(store);

        let store = SessionStore::load_from_storage(Arc::new(FileStorage::new(dir.path())));
        assert_eq!(store.current_user(), Some(&customer));
        assert!(!store.is_admin());
    }
}
