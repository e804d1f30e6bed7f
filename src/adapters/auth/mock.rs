//! Mock AuthProvider for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::AuthProvider;

/// Test provider that treats the bearer token as the user id itself.
///
/// Lets tests authenticate as any user by sending that user's id as the
/// token, with no signing involved.
#[derive(Default)]
pub struct MockAuthProvider {
    invalidated: Mutex<Vec<String>>,
}

impl MockAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens passed to `invalidate_session` (test assertions).
    pub fn invalidated(&self) -> Vec<String> {
        self.invalidated
            .lock()
            .expect("MockAuthProvider: lock poisoned")
            .clone()
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn verify_token(&self, token: &str) -> Result<UserId, DomainError> {
        token.parse::<UserId>().map_err(|_| {
            DomainError::new(ErrorCode::Unauthorized, "Invalid or expired token")
        })
    }

    async fn invalidate_session(&self, token: &str) -> Result<(), DomainError> {
        self.invalidated
            .lock()
            .expect("MockAuthProvider: lock poisoned")
            .push(token.to_string());
        Ok(())
    }
}
