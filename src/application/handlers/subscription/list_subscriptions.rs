//! Listing handlers: a user's subscriptions, and the global listing.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::SubscriptionRepository;

/// Query for all subscriptions owned by a user.
#[derive(Debug, Clone)]
pub struct ListUserSubscriptionsQuery {
    /// Account whose subscriptions are requested.
    pub owner_id: UserId,
    /// Authenticated caller; must equal `owner_id`.
    pub caller_id: UserId,
}

/// Handler for the owner-scoped listing.
pub struct ListUserSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl ListUserSubscriptionsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListUserSubscriptionsQuery,
    ) -> Result<Vec<Subscription>, SubscriptionError> {
        if query.caller_id != query.owner_id {
            return Err(SubscriptionError::unauthorized(
                "You are not the owner of this account",
            ));
        }

        Ok(self.repository.find_by_user(&query.owner_id).await?)
    }
}

/// Handler for the global listing.
pub struct ListAllSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl ListAllSubscriptionsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<Subscription>, SubscriptionError> {
        Ok(self.repository.find_all().await?)
    }
}
