use super::store::{KeyValueStore, StoreError};

/// Storage key of the session flag
pub const AUTH_KEY: &str = "isAuthenticated";

/// Persisted sign-in flag
pub trait AuthStore {
    fn get(&self) -> bool;
    fn set(&mut self, authenticated: bool) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

impl<S: KeyValueStore> AuthStore for S {
    fn get(&self) -> bool {
        KeyValueStore::get(self, AUTH_KEY).as_deref() == Some("true")
    }

    fn set(&mut self, authenticated: bool) -> Result<(), StoreError> {
        let value = if authenticated { "true" } else { "false" };
        KeyValueStore::set(self, AUTH_KEY, value)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        KeyValueStore::remove(self, AUTH_KEY)
    }
}

/// Sign-in state read once at startup and handed to whatever needs it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    pub fn load(auth: &impl AuthStore) -> Self {
        Session {
            authenticated: auth.get(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn login(&mut self, auth: &mut impl AuthStore) -> Result<(), StoreError> {
        auth.set(true)?;
        self.authenticated = true;
        tracing::info!("signed in");
        Ok(())
    }

    pub fn logout(&mut self, auth: &mut impl AuthStore) -> Result<(), StoreError> {
        auth.set(false)?;
        self.authenticated = false;
        tracing::info!("signed out");
        Ok(())
    }
}

/// Messages rotated while the simulated sign-in runs
pub const LOADING_MESSAGES: [&str; 2] = ["Refining your OKRs...", "Grooming your backlog..."];

/// Rotation interval of the loading messages
pub const LOADING_INTERVAL_MS: u64 = 300;

/// Message shown after `elapsed_ms` of the simulated sign-in
pub fn loading_message(elapsed_ms: u64) -> &'static str {
    let tick = (elapsed_ms / LOADING_INTERVAL_MS) as usize;
    LOADING_MESSAGES[tick % LOADING_MESSAGES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;

    #[test]
    fn test_missing_flag_is_signed_out() {
        let store = MemoryStore::new();
        assert!(!Session::load(&store).is_authenticated());
    }

    #[test]
    fn test_only_literal_true_signs_in() {
        let mut store = MemoryStore::new();
        KeyValueStore::set(&mut store, AUTH_KEY, "TRUE").unwrap();
        assert!(!Session::load(&store).is_authenticated());
        KeyValueStore::set(&mut store, AUTH_KEY, "true").unwrap();
        assert!(Session::load(&store).is_authenticated());
    }

    #[test]
    fn test_login_and_logout_persist_flag() {
        let mut store = MemoryStore::new();
        let mut session = Session::load(&store);
        session.login(&mut store).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(KeyValueStore::get(&store, AUTH_KEY).as_deref(), Some("true"));

        session.logout(&mut store).unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(KeyValueStore::get(&store, AUTH_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn test_clear_removes_flag() {
        let mut store = MemoryStore::new();
        AuthStore::set(&mut store, true).unwrap();
        AuthStore::clear(&mut store).unwrap();
        assert!(KeyValueStore::get(&store, AUTH_KEY).is_none());
    }

    #[test]
    fn test_loading_message_alternates() {
        assert_eq!(loading_message(0), "Refining your OKRs...");
        assert_eq!(loading_message(299), "Refining your OKRs...");
        assert_eq!(loading_message(300), "Grooming your backlog...");
        assert_eq!(loading_message(600), "Refining your OKRs...");
    }
}
