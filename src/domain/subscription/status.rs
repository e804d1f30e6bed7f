//! Subscription status state machine.
//!
//! Defines all possible subscription states and valid transitions
//! in the lifecycle.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Subscription lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Billing is ongoing; the renewal date lies in the future.
    #[default]
    Active,

    /// The owner stopped the subscription. Terminal apart from deletion.
    Canceled,

    /// The renewal date passed without the subscription being canceled.
    /// Set automatically whenever the record is evaluated for saving.
    Expired,
}

impl SubscriptionStatus {
    /// True if this subscription still counts toward upcoming renewals.
    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

impl StateMachine for SubscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            // Explicit cancel action
            (Active, Canceled)
            // Time-driven expiry on save
                | (Active, Expired)
            // Cancel of an already-expired subscription is accepted;
            // only cancel-of-canceled is rejected
                | (Expired, Canceled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubscriptionStatus::*;
        match self {
            Active => vec![Canceled, Expired],
            Expired => vec![Canceled],
            Canceled => vec![],
        }
    }
}
