//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | AlreadyCanceled | 400 (conflict kind; 400 kept for legacy API compatibility) |
//! | InvalidState | 409 |
//! | ValidationFailed | 400 |
//! | Forbidden | 403 |
//! | Unauthorized | 401 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, UserId};

/// Subscription-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Subscription was not found.
    NotFound(SubscriptionId),

    /// Cancel was requested for a subscription that is already canceled.
    AlreadyCanceled(SubscriptionId),

    /// Any other invalid status transition.
    InvalidState {
        current: String,
        attempted: String,
    },

    /// Input validation failed.
    ValidationFailed {
        field: String,
        message: String,
    },

    /// Caller is authenticated but does not own the subscription.
    Forbidden {
        subscription_id: SubscriptionId,
        user_id: UserId,
    },

    /// Caller identity does not match the requested account scope,
    /// or credentials are missing/invalid.
    Unauthorized(String),

    /// Storage or collaborator failure. Safe for the caller to retry.
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn not_found(id: SubscriptionId) -> Self {
        SubscriptionError::NotFound(id)
    }

    pub fn already_canceled(id: SubscriptionId) -> Self {
        SubscriptionError::AlreadyCanceled(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        SubscriptionError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn forbidden(subscription_id: SubscriptionId, user_id: UserId) -> Self {
        SubscriptionError::Forbidden {
            subscription_id,
            user_id,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        SubscriptionError::Unauthorized(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::NotFound(_) => ErrorCode::SubscriptionNotFound,
            SubscriptionError::AlreadyCanceled(_) => ErrorCode::AlreadyCanceled,
            SubscriptionError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            SubscriptionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SubscriptionError::Forbidden { .. } => ErrorCode::Forbidden,
            SubscriptionError::Unauthorized(_) => ErrorCode::Unauthorized,
            SubscriptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::NotFound(id) => format!("Subscription not found: {}", id),
            SubscriptionError::AlreadyCanceled(_) => {
                "Subscription is already canceled".to_string()
            }
            SubscriptionError::InvalidState { current, attempted } => {
                format!("Cannot {} subscription in {} state", attempted, current)
            }
            SubscriptionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SubscriptionError::Forbidden { .. } => {
                "You are not the owner of this subscription".to_string()
            }
            SubscriptionError::Unauthorized(message) => message.clone(),
            SubscriptionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubscriptionError::Infrastructure(_))
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SubscriptionNotFound => {
                SubscriptionError::Infrastructure(err.to_string())
            }
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => SubscriptionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => SubscriptionError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.message,
            },
            ErrorCode::Forbidden => SubscriptionError::Forbidden {
                subscription_id: SubscriptionId::new(),
                user_id: UserId::new(),
            },
            ErrorCode::Unauthorized => SubscriptionError::Unauthorized(err.message),
            _ => SubscriptionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<SubscriptionError> for DomainError {
    fn from(err: SubscriptionError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
