//! UpdateSubscriptionHandler - Command handler for whitelisted field updates.

use std::sync::Arc;

use crate::domain::foundation::{OwnedByUser, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError, SubscriptionPatch};
use crate::ports::SubscriptionRepository;

/// Command to update a subscription's mutable fields.
///
/// The patch type can only express the whitelisted fields; anything else
/// submitted at the boundary never reaches this handler.
#[derive(Debug, Clone)]
pub struct UpdateSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub user_id: UserId,
    pub patch: SubscriptionPatch,
}

/// Handler for updating subscriptions.
///
/// Re-runs the renewal derivation invariants on every save, so an update
/// that moves the renewal date into the past expires the subscription.
pub struct UpdateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl UpdateSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSubscriptionCommand,
    ) -> Result<Subscription, SubscriptionError> {
        let mut subscription = self
            .repository
            .find_by_id(&cmd.subscription_id)
            .await?
            .ok_or_else(|| SubscriptionError::not_found(cmd.subscription_id))?;

        subscription
            .check_ownership(&cmd.user_id)
            .map_err(|_| SubscriptionError::forbidden(subscription.id, cmd.user_id))?;

        subscription.apply_update(cmd.patch, Timestamp::now())?;

        self.repository.update(&subscription).await?;
        Ok(subscription)
    }
}
