//! HTTP DTOs for subscription endpoints.
//!
//! These types define the JSON request/response structure for the
//! subscription API. They are the boundary between HTTP and the
//! application layer; field whitelisting happens here by construction,
//! since a request type simply has no `status` or `user_id` field and
//! serde ignores unknown JSON keys.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::subscription::{
    BillingFrequency, Category, Currency, NewSubscription, PaymentMethod, Price,
    Subscription, SubscriptionName, SubscriptionPatch, SubscriptionStatus,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub name: String,
    pub price: f64,
    /// Defaults to USD when omitted.
    #[serde(default)]
    pub currency: Currency,
    pub frequency: BillingFrequency,
    pub category: Category,
    pub payment_method: String,
    pub start_date: Timestamp,
    /// Derived from `start_date` + frequency offset when omitted.
    #[serde(default)]
    pub renewal_date: Option<Timestamp>,
}

impl TryFrom<CreateSubscriptionRequest> for NewSubscription {
    type Error = DomainError;

    fn try_from(req: CreateSubscriptionRequest) -> Result<Self, Self::Error> {
        Ok(NewSubscription {
            name: SubscriptionName::new(req.name)?,
            price: Price::new(req.price)?,
            currency: req.currency,
            frequency: req.frequency,
            category: req.category,
            payment_method: PaymentMethod::new(req.payment_method)?,
            start_date: req.start_date,
            renewal_date: req.renewal_date,
        })
    }
}

/// Request to update a subscription. Only whitelisted fields exist here;
/// anything else in the payload is silently dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubscriptionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub frequency: Option<BillingFrequency>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub start_date: Option<Timestamp>,
    #[serde(default)]
    pub renewal_date: Option<Timestamp>,
}

impl TryFrom<UpdateSubscriptionRequest> for SubscriptionPatch {
    type Error = DomainError;

    fn try_from(req: UpdateSubscriptionRequest) -> Result<Self, Self::Error> {
        Ok(SubscriptionPatch {
            name: req.name.map(SubscriptionName::new).transpose()?,
            price: req.price.map(Price::new).transpose()?,
            currency: req.currency,
            frequency: req.frequency,
            category: req.category,
            payment_method: req.payment_method.map(PaymentMethod::new).transpose()?,
            start_date: req.start_date,
            renewal_date: req.renewal_date,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One subscription as rendered to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub price: f64,
    pub currency: Currency,
    pub frequency: BillingFrequency,
    pub category: Category,
    pub payment_method: String,
    pub status: SubscriptionStatus,
    /// ISO 8601.
    pub start_date: String,
    /// ISO 8601.
    pub renewal_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.id.to_string(),
            user_id: sub.user_id.to_string(),
            name: sub.name.as_str().to_string(),
            price: sub.price.amount(),
            currency: sub.currency,
            frequency: sub.frequency,
            category: sub.category,
            payment_method: sub.payment_method.as_str().to_string(),
            status: sub.status,
            start_date: sub.start_date.as_datetime().to_rfc3339(),
            renewal_date: sub.renewal_date.as_datetime().to_rfc3339(),
            created_at: sub.created_at.as_datetime().to_rfc3339(),
            updated_at: sub.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for a successful create.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubscriptionResponse {
    pub subscription: SubscriptionResponse,
    /// Run id reported by the reminder-workflow collaborator, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_run_id: Option<String>,
}

/// Response for listings.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionListResponse {
    pub subscriptions: Vec<SubscriptionResponse>,
}

impl SubscriptionListResponse {
    pub fn from_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions: subscriptions
                .into_iter()
                .map(SubscriptionResponse::from)
                .collect(),
        }
    }
}

/// Response for a successful delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteSubscriptionResponse {
    pub message: String,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
