//! Subscription handlers.
//!
//! Command and query handlers for the subscription lifecycle:
//!
//! ## Commands
//! - Creating subscriptions (with reminder-workflow dispatch)
//! - Updating whitelisted fields
//! - Canceling (compare-and-swap on status)
//! - Deleting
//!
//! ## Queries
//! - Get one subscription
//! - List a user's subscriptions / global listing
//! - Upcoming renewals in the 7-day window

mod cancel_subscription;
mod create_subscription;
mod delete_subscription;
mod get_subscription;
mod list_subscriptions;
mod update_subscription;
mod upcoming_renewals;

// Commands
pub use cancel_subscription::{CancelSubscriptionCommand, CancelSubscriptionHandler};
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
};
pub use delete_subscription::{DeleteSubscriptionCommand, DeleteSubscriptionHandler};
pub use update_subscription::{UpdateSubscriptionCommand, UpdateSubscriptionHandler};

// Queries
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery};
pub use list_subscriptions::{
    ListAllSubscriptionsHandler, ListUserSubscriptionsHandler, ListUserSubscriptionsQuery,
};
pub use upcoming_renewals::{UpcomingRenewalsHandler, UpcomingRenewalsQuery};
