//! GetSubscriptionHandler - Query handler for a single subscription.

use std::sync::Arc;

use crate::domain::foundation::{OwnedByUser, SubscriptionId, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::SubscriptionRepository;

/// Query for one subscription by id.
#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub subscription_id: SubscriptionId,
    pub user_id: UserId,
}

/// Handler for fetching a single subscription.
///
/// Ownership is enforced here as everywhere else; there is no
/// unauthenticated read path.
pub struct GetSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl GetSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetSubscriptionQuery,
    ) -> Result<Subscription, SubscriptionError> {
        let subscription = self
            .repository
            .find_by_id(&query.subscription_id)
            .await?
            .ok_or_else(|| SubscriptionError::not_found(query.subscription_id))?;

        subscription
            .check_ownership(&query.user_id)
            .map_err(|_| SubscriptionError::forbidden(subscription.id, query.user_id))?;

        Ok(subscription)
    }
}
