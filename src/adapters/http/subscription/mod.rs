//! Subscription HTTP adapter: DTOs, handlers, and routes.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AuthenticatedUser, SubscriptionApiError, SubscriptionAppState};
pub use routes::{subscription_router, subscription_routes};
