//! CreateSubscriptionHandler - Command handler for creating subscriptions.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{NewSubscription, Subscription, SubscriptionError};
use crate::ports::{SubscriptionRepository, WorkflowDispatcher};

/// Command to create a subscription. The owner is always the caller.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub user_id: UserId,
    pub subscription: NewSubscription,
}

/// Result of a successful creation.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionResult {
    pub subscription: Subscription,
    /// Run id reported by the reminder-workflow collaborator, if any.
    pub workflow_run_id: Option<String>,
}

/// Handler for creating subscriptions.
///
/// Runs the renewal-date derivation at create time, persists the record,
/// then asks the workflow collaborator to schedule reminders. Dispatch
/// failure does not fail the create: the subscription is already
/// committed, and the reminder workflow is best-effort.
pub struct CreateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    workflow_dispatcher: Arc<dyn WorkflowDispatcher>,
}

impl CreateSubscriptionHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        workflow_dispatcher: Arc<dyn WorkflowDispatcher>,
    ) -> Self {
        Self {
            repository,
            workflow_dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<CreateSubscriptionResult, SubscriptionError> {
        let subscription = Subscription::create(
            SubscriptionId::new(),
            cmd.user_id,
            cmd.subscription,
            Timestamp::now(),
        )?;

        self.repository.save(&subscription).await?;

        let workflow_run_id = match self
            .workflow_dispatcher
            .schedule_reminder(subscription.id)
            .await
        {
            Ok(run_id) => run_id,
            Err(err) => {
                warn!(
                    subscription_id = %subscription.id,
                    error = %err,
                    "reminder workflow dispatch failed"
                );
                None
            }
        };

        Ok(CreateSubscriptionResult {
            subscription,
            workflow_run_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySubscriptionRepository;
    use crate::adapters::workflow::RecordingWorkflowDispatcher;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::subscription::{
        BillingFrequency, Category, Currency, PaymentMethod, Price, SubscriptionName,
        SubscriptionStatus,
    };
    use async_trait::async_trait;

    struct FailingRepository;

    #[async_trait]
    impl SubscriptionRepository for FailingRepository {
        async fn save(&self, _subscription: &Subscription) -> Result<(), DomainError> {
            Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated save failure",
            ))
        }

        async fn update(&self, _subscription: &Subscription) -> Result<(), DomainError> {
            unreachable!("not used in these tests")
        }

        async fn update_if_status(
            &self,
            _subscription: &Subscription,
            _expected: SubscriptionStatus,
        ) -> Result<bool, DomainError> {
            unreachable!("not used in these tests")
        }

        async fn find_by_id(
            &self,
            _id: &SubscriptionId,
        ) -> Result<Option<Subscription>, DomainError> {
            Ok(None)
        }

        async fn find_by_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<Subscription>, DomainError> {
            Ok(vec![])
        }

        async fn find_all(&self) -> Result<Vec<Subscription>, DomainError> {
            Ok(vec![])
        }

        async fn find_renewing_between(
            &self,
            _user_id: &UserId,
            _from: Timestamp,
            _to: Timestamp,
        ) -> Result<Vec<Subscription>, DomainError> {
            Ok(vec![])
        }

        async fn delete(&self, _id: &SubscriptionId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn valid_input() -> NewSubscription {
        NewSubscription {
            name: SubscriptionName::new("Netflix").unwrap(),
            price: Price::new(15.49).unwrap(),
            currency: Currency::Usd,
            frequency: BillingFrequency::Monthly,
            category: Category::Entertainment,
            payment_method: PaymentMethod::new("visa **42").unwrap(),
            start_date: Timestamp::now().minus_days(1),
            renewal_date: None,
        }
    }

    #[tokio::test]
    async fn creates_and_persists_with_derived_renewal() {
        let repo = Arc::new(InMemorySubscriptionRepository::new());
        let dispatcher = Arc::new(RecordingWorkflowDispatcher::new());
        let handler = CreateSubscriptionHandler::new(repo.clone(), dispatcher);
        let user_id = UserId::new();

        let result = handler
            .handle(CreateSubscriptionCommand {
                user_id,
                subscription: valid_input(),
            })
            .await
            .unwrap();

        let sub = &result.subscription;
        assert_eq!(sub.user_id, user_id);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.renewal_date, sub.start_date.add_days(30));
        assert_eq!(repo.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn dispatches_reminder_workflow_for_new_subscription() {
        let repo = Arc::new(InMemorySubscriptionRepository::new());
        let dispatcher = Arc::new(RecordingWorkflowDispatcher::new());
        let handler = CreateSubscriptionHandler::new(repo, dispatcher.clone());

        let result = handler
            .handle(CreateSubscriptionCommand {
                user_id: UserId::new(),
                subscription: valid_input(),
            })
            .await
            .unwrap();

        assert_eq!(dispatcher.scheduled(), vec![result.subscription.id]);
        assert!(result.workflow_run_id.is_some());
    }

    #[tokio::test]
    async fn dispatch_failure_does_not_fail_the_create() {
        let repo = Arc::new(InMemorySubscriptionRepository::new());
        let dispatcher = Arc::new(RecordingWorkflowDispatcher::failing());
        let handler = CreateSubscriptionHandler::new(repo.clone(), dispatcher);

        let result = handler
            .handle(CreateSubscriptionCommand {
                user_id: UserId::new(),
                subscription: valid_input(),
            })
            .await
            .unwrap();

        assert!(result.workflow_run_id.is_none());
        assert_eq!(repo.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn rejects_start_date_in_the_future() {
        let repo = Arc::new(InMemorySubscriptionRepository::new());
        let dispatcher = Arc::new(RecordingWorkflowDispatcher::new());
        let handler = CreateSubscriptionHandler::new(repo.clone(), dispatcher.clone());

        let mut input = valid_input();
        input.start_date = Timestamp::now().add_days(2);

        let result = handler
            .handle(CreateSubscriptionCommand {
                user_id: UserId::new(),
                subscription: input,
            })
            .await;

        assert!(matches!(
            result,
            Err(SubscriptionError::ValidationFailed { .. })
        ));
        assert!(repo.snapshot().is_empty());
        assert!(dispatcher.scheduled().is_empty());
    }

    #[tokio::test]
    async fn rejects_renewal_date_not_after_start() {
        let repo = Arc::new(InMemorySubscriptionRepository::new());
        let dispatcher = Arc::new(RecordingWorkflowDispatcher::new());
        let handler = CreateSubscriptionHandler::new(repo, dispatcher);

        let mut input = valid_input();
        input.renewal_date = Some(input.start_date.minus_days(1));

        let result = handler
            .handle(CreateSubscriptionCommand {
                user_id: UserId::new(),
                subscription: input,
            })
            .await;

        assert!(matches!(
            result,
            Err(SubscriptionError::ValidationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn save_failure_surfaces_as_infrastructure() {
        let repo = Arc::new(FailingRepository);
        let dispatcher = Arc::new(RecordingWorkflowDispatcher::new());
        let handler = CreateSubscriptionHandler::new(repo, dispatcher.clone());

        let result = handler
            .handle(CreateSubscriptionCommand {
                user_id: UserId::new(),
                subscription: valid_input(),
            })
            .await;

        assert!(matches!(result, Err(SubscriptionError::Infrastructure(_))));
        // Nothing to remind about when the save never happened
        assert!(dispatcher.scheduled().is_empty());
    }
}
