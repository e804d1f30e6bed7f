//! UpcomingRenewalsHandler - Query handler for the due-soon window.
//!
//! This is the query the reminder workflow polls: active subscriptions of
//! one user whose renewal date falls within the next seven days.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::reminders;
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::SubscriptionRepository;

/// Query for subscriptions renewing within the due-soon window.
#[derive(Debug, Clone)]
pub struct UpcomingRenewalsQuery {
    /// Account whose renewals are requested.
    pub owner_id: UserId,
    /// Authenticated caller; must equal `owner_id`.
    pub caller_id: UserId,
}

/// Handler for the upcoming-renewals query.
///
/// The window is `[now, now + 7 days]`, inclusive on both ends, computed
/// at query time. Results are ordered by renewal date ascending.
pub struct UpcomingRenewalsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl UpcomingRenewalsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: UpcomingRenewalsQuery,
    ) -> Result<Vec<Subscription>, SubscriptionError> {
        if query.caller_id != query.owner_id {
            return Err(SubscriptionError::unauthorized(
                "You are not the owner of this account",
            ));
        }

        let (from, to) = reminders::due_soon_window(Timestamp::now());
        Ok(self
            .repository
            .find_renewing_between(&query.owner_id, from, to)
            .await?)
    }
}
