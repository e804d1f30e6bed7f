//! Subscription aggregate entity.
//!
//! A Subscription represents one recurring payment obligation owned by a
//! user. The aggregate owns the renewal-date derivation rule and the
//! status state machine; handlers call [`Subscription::create`] and the
//! mutators here, then persist through the repository port.
//!
//! # Invariants
//!
//! - `renewal_date > start_date` always
//! - A renewal date in the past forces status to `Expired` unless the
//!   subscription is `Canceled` (checked on every save, not once)
//! - `user_id` never changes after creation

use crate::domain::foundation::{
    DomainError, ErrorCode, OwnedByUser, StateMachine, SubscriptionId, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

use super::{
    BillingFrequency, Category, Currency, PaymentMethod, Price, SubscriptionName,
    SubscriptionStatus,
};

/// Validated input for creating a subscription.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: SubscriptionName,
    pub price: Price,
    pub currency: Currency,
    pub frequency: BillingFrequency,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub start_date: Timestamp,
    /// Derived from `start_date` + frequency offset when absent.
    pub renewal_date: Option<Timestamp>,
}

/// Whitelisted mutable fields for an update.
///
/// `status` and `user_id` are deliberately not representable here; callers
/// submitting them see them silently ignored, matching the legacy API.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionPatch {
    pub name: Option<SubscriptionName>,
    pub price: Option<Price>,
    pub currency: Option<Currency>,
    pub frequency: Option<BillingFrequency>,
    pub category: Option<Category>,
    pub payment_method: Option<PaymentMethod>,
    pub start_date: Option<Timestamp>,
    pub renewal_date: Option<Timestamp>,
}

/// Subscription aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub name: SubscriptionName,
    pub price: Price,
    pub currency: Currency,
    pub frequency: BillingFrequency,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub status: SubscriptionStatus,
    pub start_date: Timestamp,
    pub renewal_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Create a new subscription for `user_id`.
    ///
    /// Derives the renewal date when none was supplied and immediately
    /// applies the expiry rule, so a subscription whose renewal date is
    /// already past is created as `Expired`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `start_date` is in the future
    /// - `ValidationFailed` if a supplied `renewal_date` is not strictly
    ///   after `start_date`
    pub fn create(
        id: SubscriptionId,
        user_id: UserId,
        input: NewSubscription,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        if input.start_date.is_after(&now) {
            return Err(DomainError::validation(
                "start_date",
                "Start date must not be in the future",
            ));
        }

        let renewal_date = match input.renewal_date {
            Some(supplied) => {
                Self::check_renewal_after_start(&supplied, &input.start_date)?;
                supplied
            }
            None => input
                .start_date
                .add_days(input.frequency.renewal_offset_days()),
        };

        let mut subscription = Self {
            id,
            user_id,
            name: input.name,
            price: input.price,
            currency: input.currency,
            frequency: input.frequency,
            category: input.category,
            payment_method: input.payment_method,
            status: SubscriptionStatus::Active,
            start_date: input.start_date,
            renewal_date,
            created_at: now,
            updated_at: now,
        };
        subscription.apply_renewal_policy(now);
        Ok(subscription)
    }

    /// Keep status consistent with elapsed time.
    ///
    /// Runs before every persistence of the record: a renewal date
    /// strictly in the past expires the subscription unless it is
    /// canceled. Idempotent on an already-consistent record.
    pub fn apply_renewal_policy(&mut self, now: Timestamp) {
        if self.renewal_date.is_before(&now) && self.status != SubscriptionStatus::Canceled {
            self.status = SubscriptionStatus::Expired;
        }
    }

    /// Apply a whitelisted field update, then re-run the save invariants.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the resulting `renewal_date` is not strictly
    ///   after the resulting `start_date`
    pub fn apply_update(
        &mut self,
        patch: SubscriptionPatch,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        let start_date = patch.start_date.unwrap_or(self.start_date);
        let renewal_date = patch.renewal_date.unwrap_or(self.renewal_date);
        Self::check_renewal_after_start(&renewal_date, &start_date)?;

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(payment_method) = patch.payment_method {
            self.payment_method = payment_method;
        }
        self.start_date = start_date;
        self.renewal_date = renewal_date;

        self.apply_renewal_policy(now);
        self.updated_at = now;
        Ok(())
    }

    /// Cancel this subscription, returning the status it was canceled from.
    ///
    /// The returned prior status is what the repository's conditional
    /// update guards on, so a concurrent second cancel fails the guard
    /// instead of silently succeeding.
    ///
    /// # Errors
    ///
    /// - `AlreadyCanceled` if the subscription is already canceled
    pub fn cancel(&mut self, now: Timestamp) -> Result<SubscriptionStatus, DomainError> {
        if self.status == SubscriptionStatus::Canceled {
            return Err(DomainError::new(
                ErrorCode::AlreadyCanceled,
                "Subscription is already canceled",
            ));
        }

        let prior = self.status;
        self.status = self
            .status
            .transition_to(SubscriptionStatus::Canceled)
            .map_err(DomainError::from)?;
        self.updated_at = now;
        Ok(prior)
    }

    /// True if the subscription is active and renews within `[from, to]`,
    /// inclusive on both ends.
    pub fn renews_between(&self, from: &Timestamp, to: &Timestamp) -> bool {
        self.status.is_active()
            && !self.renewal_date.is_before(from)
            && !self.renewal_date.is_after(to)
    }

    fn check_renewal_after_start(
        renewal_date: &Timestamp,
        start_date: &Timestamp,
    ) -> Result<(), DomainError> {
        if !renewal_date.is_after(start_date) {
            return Err(DomainError::validation(
                "renewal_date",
                "Renewal date must be after start date",
            ));
        }
        Ok(())
    }
}

impl OwnedByUser for Subscription {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
