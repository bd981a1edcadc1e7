// src/integrations/api/auth.rs
//
// Credential seam. Login and token refresh live outside this crate; the store
// only asks for the current token right before each call.

use std::sync::RwLock;

/// Source of the bearer token for API calls.
pub trait TokenProvider: Send + Sync {
    /// The current token, or `None` when the operator is signed out.
    fn token(&self) -> Option<String>;
}

/// Fixed token, for scripts and tests.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Token owned by the signed-in session. Replaced on login, cleared on logout.
#[derive(Debug, Default)]
pub struct SessionToken {
    current: RwLock<Option<String>>,
}

impl SessionToken {
    pub fn new(token: Option<String>) -> Self {
        Self {
            current: RwLock::new(token),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.current.write().unwrap() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.current.write().unwrap() = None;
    }
}

impl TokenProvider for SessionToken {
    fn token(&self) -> Option<String> {
        self.current.read().unwrap().clone()
    }
}
