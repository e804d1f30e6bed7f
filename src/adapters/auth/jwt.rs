//! JWT implementation of the AuthProvider port.
//!
//! HS256 tokens with the user id in the `sub` claim and a configured
//! expiry. Verification rejects bad signatures, expired tokens, and
//! subjects that are not valid user ids.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::AuthProvider;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Owning user id.
    sub: String,
    /// Issued-at, Unix seconds.
    iat: i64,
    /// Expiry, Unix seconds.
    exp: i64,
}

/// HS256 token issuer/verifier.
pub struct JwtAuthProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl_secs: i64,
}

impl JwtAuthProvider {
    pub fn new(secret: &Secret<String>, token_ttl_secs: u64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::new(Algorithm::HS256),
            token_ttl_secs: token_ttl_secs as i64,
        }
    }

    /// Issue a signed token for `user_id` expiring after the configured TTL.
    pub fn issue_token(&self, user_id: &UserId) -> Result<String, DomainError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.token_ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to sign token: {}", e),
            )
        })
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn verify_token(&self, token: &str) -> Result<UserId, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::Unauthorized,
                    format!("Invalid or expired token: {}", e),
                )
            })?;

        data.claims.sub.parse::<UserId>().map_err(|_| {
            DomainError::new(ErrorCode::Unauthorized, "Token subject is not a user id")
        })
    }

    async fn invalidate_session(&self, _token: &str) -> Result<(), DomainError> {
        // Stateless tokens: nothing to revoke. Revocation lists belong to
        // the identity collaborator.
        Ok(())
    }
}
