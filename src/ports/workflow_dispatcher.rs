//! Workflow dispatcher port.
//!
//! After a subscription is created, an external durable-workflow
//! collaborator takes over: it sleeps until each reminder date and
//! triggers the email sends. This port is the single call the service
//! makes into that collaborator; the scheduling itself is not
//! reimplemented here.

use crate::domain::foundation::{DomainError, SubscriptionId};
use async_trait::async_trait;

/// Port for scheduling the renewal-reminder workflow.
#[async_trait]
pub trait WorkflowDispatcher: Send + Sync {
    /// Ask the collaborator to run the reminder workflow for a
    /// subscription. Returns the collaborator's run identifier when it
    /// provides one.
    async fn schedule_reminder(
        &self,
        subscription_id: SubscriptionId,
    ) -> Result<Option<String>, DomainError>;
}
