//! CancelSubscriptionHandler - Command handler for canceling subscriptions.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, OwnedByUser, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError, SubscriptionStatus};
use crate::ports::SubscriptionRepository;

/// Command to cancel a subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub user_id: UserId,
}

/// Handler for canceling subscriptions.
///
/// The save is a compare-and-swap on the status read at the start of the
/// request. When two callers race, exactly one CAS succeeds; the loser
/// re-reads and reports the already-canceled conflict instead of
/// silently succeeding.
pub struct CancelSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl CancelSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CancelSubscriptionCommand,
    ) -> Result<Subscription, SubscriptionError> {
        let mut subscription = self
            .repository
            .find_by_id(&cmd.subscription_id)
            .await?
            .ok_or_else(|| SubscriptionError::not_found(cmd.subscription_id))?;

        subscription
            .check_ownership(&cmd.user_id)
            .map_err(|_| SubscriptionError::forbidden(subscription.id, cmd.user_id))?;

        let prior_status = subscription.cancel(Timestamp::now()).map_err(|err| {
            if err.code == ErrorCode::AlreadyCanceled {
                SubscriptionError::already_canceled(cmd.subscription_id)
            } else {
                SubscriptionError::invalid_state(format!("{:?}", subscription.status), "cancel")
            }
        })?;

        let committed = self
            .repository
            .update_if_status(&subscription, prior_status)
            .await?;
        if !committed {
            return Err(self.classify_guard_failure(&cmd.subscription_id).await?);
        }

        Ok(subscription)
    }

    /// The CAS lost: somebody changed the status between our read and
    /// write. Re-read to report what actually happened.
    async fn classify_guard_failure(
        &self,
        id: &SubscriptionId,
    ) -> Result<SubscriptionError, SubscriptionError> {
        let current = self.repository.find_by_id(id).await?;
        Ok(match current {
            Some(stored) if stored.status == SubscriptionStatus::Canceled => {
                SubscriptionError::already_canceled(*id)
            }
            Some(_) => SubscriptionError::infrastructure(
                "Subscription was modified concurrently; retry the cancel",
            ),
            None => SubscriptionError::not_found(*id),
        })
    }
}
