//! Subscription repository port.
//!
//! Defines the contract for persisting and retrieving Subscription
//! aggregates. Implementations handle the actual database operations.
//!
//! # Design
//!
//! - **Injected handle**: adapters are constructed around an explicitly
//!   passed-in connection handle with explicit lifecycle, never a
//!   module-level cached connection
//! - **Conditional writes**: status-changing saves go through
//!   [`SubscriptionRepository::update_if_status`] so the check happens at
//!   commit time, not only at request entry

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use async_trait::async_trait;

/// Repository port for Subscription aggregate persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Save a new subscription.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Update an existing subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the subscription doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Update only if the stored status still equals `expected`.
    ///
    /// Single conditional read-modify-write: returns `Ok(false)` when the
    /// guard fails because a concurrent writer changed the status first.
    /// Used by cancel so the second concurrent caller observes the
    /// conflict instead of silently succeeding.
    async fn update_if_status(
        &self,
        subscription: &Subscription,
        expected: SubscriptionStatus,
    ) -> Result<bool, DomainError>;

    /// Find a subscription by its ID. Returns `None` if not found.
    async fn find_by_id(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<Subscription>, DomainError>;

    /// All subscriptions owned by `user_id`, ordered by creation time.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError>;

    /// Every subscription in the store (global listing).
    async fn find_all(&self) -> Result<Vec<Subscription>, DomainError>;

    /// Active subscriptions of `user_id` whose renewal date falls within
    /// `[from, to]`, inclusive on both ends, ordered by renewal date
    /// ascending.
    async fn find_renewing_between(
        &self,
        user_id: &UserId,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Subscription>, DomainError>;

    /// Delete a subscription permanently. No soft delete.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the subscription doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &SubscriptionId) -> Result<(), DomainError>;
}
