//! In-memory subscription repository.
//!
//! Deterministic, lock-based implementation used by unit and integration
//! tests and by local development without a database. Not for production:
//! lock poisoning panics instead of surfacing an error.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, ErrorCode, SubscriptionId, Timestamp, UserId,
};
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use crate::ports::SubscriptionRepository;

/// In-memory implementation of the SubscriptionRepository port.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-seeded with `subscriptions`.
    pub fn with_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions: Mutex::new(subscriptions),
        }
    }

    /// Snapshot of the stored records (test assertions).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn snapshot(&self) -> Vec<Subscription> {
        self.subscriptions
            .lock()
            .expect("InMemorySubscriptionRepository: lock poisoned")
            .clone()
    }

    fn not_found(id: &SubscriptionId) -> DomainError {
        DomainError::new(
            ErrorCode::SubscriptionNotFound,
            format!("Subscription not found: {}", id),
        )
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.subscriptions
            .lock()
            .expect("InMemorySubscriptionRepository: lock poisoned")
            .push(subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("InMemorySubscriptionRepository: lock poisoned");
        match subscriptions.iter_mut().find(|s| s.id == subscription.id) {
            Some(stored) => {
                *stored = subscription.clone();
                Ok(())
            }
            None => Err(Self::not_found(&subscription.id)),
        }
    }

    async fn update_if_status(
        &self,
        subscription: &Subscription,
        expected: SubscriptionStatus,
    ) -> Result<bool, DomainError> {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("InMemorySubscriptionRepository: lock poisoned");
        match subscriptions.iter_mut().find(|s| s.id == subscription.id) {
            Some(stored) if stored.status == expected => {
                *stored = subscription.clone();
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(Self::not_found(&subscription.id)),
        }
    }

    async fn find_by_id(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<Subscription>, DomainError> {
        Ok(self.snapshot().into_iter().find(|s| &s.id == id))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let mut owned: Vec<Subscription> = self
            .snapshot()
            .into_iter()
            .filter(|s| &s.user_id == user_id)
            .collect();
        owned.sort_by_key(|s| s.created_at);
        Ok(owned)
    }

    async fn find_all(&self) -> Result<Vec<Subscription>, DomainError> {
        let mut all = self.snapshot();
        all.sort_by_key(|s| s.created_at);
        Ok(all)
    }

    async fn find_renewing_between(
        &self,
        user_id: &UserId,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Subscription>, DomainError> {
        let mut due: Vec<Subscription> = self
            .snapshot()
            .into_iter()
            .filter(|s| &s.user_id == user_id && s.renews_between(&from, &to))
            .collect();
        due.sort_by_key(|s| s.renewal_date);
        Ok(due)
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<(), DomainError> {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("InMemorySubscriptionRepository: lock poisoned");
        match subscriptions.iter().position(|s| &s.id == id) {
            Some(pos) => {
                subscriptions.remove(pos);
                Ok(())
            }
            None => Err(Self::not_found(id)),
        }
    }
}
