//! Subscription domain module.
//!
//! Owns the renewal-date derivation rule, the status state machine, and
//! the due-soon window semantics used by reminder scheduling.
//!
//! # Module Structure
//!
//! - `aggregate` - Subscription aggregate entity
//! - `status` - SubscriptionStatus state machine
//! - `frequency` - BillingFrequency and its renewal offset
//! - `values` - Field value objects (name, price, currency, category, payment)
//! - `reminders` - Pure reminder-schedule helpers for the workflow collaborator
//! - `errors` - Subscription error taxonomy

mod aggregate;
mod errors;
mod frequency;
pub mod reminders;
mod status;
mod values;

pub use aggregate::{NewSubscription, Subscription, SubscriptionPatch};
pub use errors::SubscriptionError;
pub use frequency::BillingFrequency;
pub use status::SubscriptionStatus;
pub use values::{Category, Currency, PaymentMethod, Price, SubscriptionName};
