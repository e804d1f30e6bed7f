//! HTTP handlers for subscription endpoints.
//!
//! These handlers connect axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CreateSubscriptionCommand,
    CreateSubscriptionHandler, DeleteSubscriptionCommand, DeleteSubscriptionHandler,
    GetSubscriptionHandler, GetSubscriptionQuery, ListAllSubscriptionsHandler,
    ListUserSubscriptionsHandler, ListUserSubscriptionsQuery, UpcomingRenewalsHandler,
    UpcomingRenewalsQuery, UpdateSubscriptionCommand, UpdateSubscriptionHandler,
};
use crate::domain::foundation::{SubscriptionId, UserId};
use crate::domain::subscription::{NewSubscription, SubscriptionError, SubscriptionPatch};
use crate::ports::{AuthProvider, SubscriptionRepository, WorkflowDispatcher};

use super::dto::{
    CreateSubscriptionRequest, CreateSubscriptionResponse, DeleteSubscriptionResponse,
    ErrorResponse, SubscriptionListResponse, SubscriptionResponse, UpdateSubscriptionRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped ports wired up once
/// at startup.
#[derive(Clone)]
pub struct SubscriptionAppState {
    pub subscription_repository: Arc<dyn SubscriptionRepository>,
    pub auth_provider: Arc<dyn AuthProvider>,
    pub workflow_dispatcher: Arc<dyn WorkflowDispatcher>,
}

impl SubscriptionAppState {
    pub fn create_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(
            self.subscription_repository.clone(),
            self.workflow_dispatcher.clone(),
        )
    }

    pub fn get_handler(&self) -> GetSubscriptionHandler {
        GetSubscriptionHandler::new(self.subscription_repository.clone())
    }

    pub fn list_user_handler(&self) -> ListUserSubscriptionsHandler {
        ListUserSubscriptionsHandler::new(self.subscription_repository.clone())
    }

    pub fn list_all_handler(&self) -> ListAllSubscriptionsHandler {
        ListAllSubscriptionsHandler::new(self.subscription_repository.clone())
    }

    pub fn update_handler(&self) -> UpdateSubscriptionHandler {
        UpdateSubscriptionHandler::new(self.subscription_repository.clone())
    }

    pub fn cancel_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.subscription_repository.clone())
    }

    pub fn delete_handler(&self) -> DeleteSubscriptionHandler {
        DeleteSubscriptionHandler::new(self.subscription_repository.clone())
    }

    pub fn upcoming_renewals_handler(&self) -> UpcomingRenewalsHandler {
        UpcomingRenewalsHandler::new(self.subscription_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Authenticated caller extraction
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context, extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl axum::extract::FromRequestParts<SubscriptionAppState> for AuthenticatedUser {
    type Rejection = SubscriptionApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        state: &'life1 SubscriptionAppState,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get(http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .ok_or_else(|| {
                    SubscriptionApiError(SubscriptionError::unauthorized(
                        "Missing bearer token",
                    ))
                })?;

            let user_id = state
                .auth_provider
                .verify_token(token)
                .await
                .map_err(|err| {
                    SubscriptionApiError(SubscriptionError::unauthorized(err.message))
                })?;

            Ok(AuthenticatedUser { user_id })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/subscriptions - Create a subscription for the caller.
pub async fn create_subscription(
    State(state): State<SubscriptionAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateSubscriptionRequest>,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let input = NewSubscription::try_from(request).map_err(SubscriptionError::from)?;

    let result = state
        .create_handler()
        .handle(CreateSubscriptionCommand {
            user_id: user.user_id,
            subscription: input,
        })
        .await?;

    let response = CreateSubscriptionResponse {
        subscription: SubscriptionResponse::from(result.subscription),
        workflow_run_id: result.workflow_run_id,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/subscriptions - Global listing.
pub async fn list_all_subscriptions(
    State(state): State<SubscriptionAppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let subscriptions = state.list_all_handler().handle().await?;
    Ok(Json(SubscriptionListResponse::from_subscriptions(
        subscriptions,
    )))
}

/// GET /api/v1/subscriptions/{id} - One subscription, owner only.
pub async fn get_subscription(
    State(state): State<SubscriptionAppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let subscription = state
        .get_handler()
        .handle(GetSubscriptionQuery {
            subscription_id: SubscriptionId::from_uuid(id),
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

/// PUT /api/v1/subscriptions/{id} - Update whitelisted fields.
pub async fn update_subscription(
    State(state): State<SubscriptionAppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSubscriptionRequest>,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let patch = SubscriptionPatch::try_from(request).map_err(SubscriptionError::from)?;

    let subscription = state
        .update_handler()
        .handle(UpdateSubscriptionCommand {
            subscription_id: SubscriptionId::from_uuid(id),
            user_id: user.user_id,
            patch,
        })
        .await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

/// PUT /api/v1/subscriptions/{id}/cancel - Cancel, owner only.
pub async fn cancel_subscription(
    State(state): State<SubscriptionAppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let subscription = state
        .cancel_handler()
        .handle(CancelSubscriptionCommand {
            subscription_id: SubscriptionId::from_uuid(id),
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

/// DELETE /api/v1/subscriptions/{id} - Permanent delete, owner only.
pub async fn delete_subscription(
    State(state): State<SubscriptionAppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    state
        .delete_handler()
        .handle(DeleteSubscriptionCommand {
            subscription_id: SubscriptionId::from_uuid(id),
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(DeleteSubscriptionResponse {
        message: "Subscription deleted successfully".to_string(),
    }))
}

/// GET /api/v1/subscriptions/user/{user_id} - Owner-scoped listing.
pub async fn list_user_subscriptions(
    State(state): State<SubscriptionAppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let subscriptions = state
        .list_user_handler()
        .handle(ListUserSubscriptionsQuery {
            owner_id: UserId::from_uuid(user_id),
            caller_id: user.user_id,
        })
        .await?;

    Ok(Json(SubscriptionListResponse::from_subscriptions(
        subscriptions,
    )))
}

/// GET /api/v1/subscriptions/user/{user_id}/upcoming-renewals -
/// Renewals due within the next seven days.
pub async fn upcoming_renewals(
    State(state): State<SubscriptionAppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    let subscriptions = state
        .upcoming_renewals_handler()
        .handle(UpcomingRenewalsQuery {
            owner_id: UserId::from_uuid(user_id),
            caller_id: user.user_id,
        })
        .await?;

    Ok(Json(SubscriptionListResponse::from_subscriptions(
        subscriptions,
    )))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════════

/// Wrapper mapping `SubscriptionError` onto HTTP responses.
pub struct SubscriptionApiError(pub SubscriptionError);

impl From<SubscriptionError> for SubscriptionApiError {
    fn from(err: SubscriptionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for SubscriptionApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            SubscriptionError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "SUBSCRIPTION_NOT_FOUND")
            }
            // Conflict kind, but the legacy API reports 400
            SubscriptionError::AlreadyCanceled(_) => {
                (StatusCode::BAD_REQUEST, "ALREADY_CANCELED")
            }
            SubscriptionError::InvalidState { .. } => {
                (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION")
            }
            SubscriptionError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            SubscriptionError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            SubscriptionError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            SubscriptionError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
