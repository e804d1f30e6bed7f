//! Workflow dispatcher adapters.
//!
//! The real reminder workflow runs in an external durable-scheduling
//! service. These adapters stand in for it: one logs the dispatch for
//! deployments where the collaborator is wired out-of-band, one records
//! calls for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId};
use crate::ports::WorkflowDispatcher;

/// Dispatcher stand-in that logs the request and reports no run id.
#[derive(Debug, Default)]
pub struct LoggingWorkflowDispatcher;

impl LoggingWorkflowDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WorkflowDispatcher for LoggingWorkflowDispatcher {
    async fn schedule_reminder(
        &self,
        subscription_id: SubscriptionId,
    ) -> Result<Option<String>, DomainError> {
        info!(%subscription_id, "reminder workflow dispatch requested");
        Ok(None)
    }
}

/// Recording dispatcher for tests.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned; acceptable in tests.
#[derive(Default)]
pub struct RecordingWorkflowDispatcher {
    scheduled: Mutex<Vec<SubscriptionId>>,
    fail: bool,
}

impl RecordingWorkflowDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher whose every call fails, for error-path tests.
    pub fn failing() -> Self {
        Self {
            scheduled: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Subscription ids that were dispatched.
    pub fn scheduled(&self) -> Vec<SubscriptionId> {
        self.scheduled
            .lock()
            .expect("RecordingWorkflowDispatcher: lock poisoned")
            .clone()
    }
}

#[async_trait]
impl WorkflowDispatcher for RecordingWorkflowDispatcher {
    async fn schedule_reminder(
        &self,
        subscription_id: SubscriptionId,
    ) -> Result<Option<String>, DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::WorkflowDispatchFailed,
                "Simulated dispatch failure",
            ));
        }
        self.scheduled
            .lock()
            .expect("RecordingWorkflowDispatcher: lock poisoned")
            .push(subscription_id);
        Ok(Some(format!("run-{}", subscription_id)))
    }
}
