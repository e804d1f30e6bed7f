//! DeleteSubscriptionHandler - Command handler for permanent deletion.

use std::sync::Arc;

use crate::domain::foundation::{OwnedByUser, SubscriptionId, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::SubscriptionRepository;

/// Command to delete a subscription. Allowed from any status; no soft delete.
#[derive(Debug, Clone)]
pub struct DeleteSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub user_id: UserId,
}

/// Handler for deleting subscriptions.
pub struct DeleteSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl DeleteSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteSubscriptionCommand,
    ) -> Result<Subscription, SubscriptionError> {
        let subscription = self
            .repository
            .find_by_id(&cmd.subscription_id)
            .await?
            .ok_or_else(|| SubscriptionError::not_found(cmd.subscription_id))?;

        subscription
            .check_ownership(&cmd.user_id)
            .map_err(|_| SubscriptionError::forbidden(subscription.id, cmd.user_id))?;

        self.repository.delete(&cmd.subscription_id).await?;
        Ok(subscription)
    }
}
