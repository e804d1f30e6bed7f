//! Authentication provider port.
//!
//! The service only needs two things from the identity collaborator:
//! turn a bearer token into a `UserId`, and (eventually) invalidate a
//! session on sign-out. Token issuance, password storage, and user
//! records live with the collaborator.

use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// Port for verifying caller identity.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify a bearer token and return the authenticated user's id.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` for a missing subject, bad signature, or expired
    ///   token
    async fn verify_token(&self, token: &str) -> Result<UserId, DomainError>;

    /// Invalidate the session behind `token`.
    ///
    /// Collaborator signature only: stateless-token deployments have
    /// nothing to revoke and return `Ok(())` without side effects.
    async fn invalidate_session(&self, token: &str) -> Result<(), DomainError>;
}
