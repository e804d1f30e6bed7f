//! Axum router configuration for subscription endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    cancel_subscription, create_subscription, delete_subscription, get_subscription,
    list_all_subscriptions, list_user_subscriptions, upcoming_renewals, update_subscription,
    SubscriptionAppState,
};

/// Create the subscription API router.
///
/// # Routes (all require a bearer token)
///
/// - `GET /` - Global listing
/// - `POST /` - Create subscription (201)
/// - `GET /{id}` - Get one subscription (owner only)
/// - `PUT /{id}` - Update whitelisted fields (owner only)
/// - `DELETE /{id}` - Delete permanently (owner only)
/// - `PUT /{id}/cancel` - Cancel (owner only, conflict when already canceled)
/// - `GET /user/{user_id}` - Owner-scoped listing (caller must be the user)
/// - `GET /user/{user_id}/upcoming-renewals` - 7-day due-soon window
pub fn subscription_routes() -> Router<SubscriptionAppState> {
    Router::new()
        .route("/", get(list_all_subscriptions).post(create_subscription))
        .route(
            "/:id",
            get(get_subscription)
                .put(update_subscription)
                .delete(delete_subscription),
        )
        .route("/:id/cancel", put(cancel_subscription))
        .route("/user/:user_id", get(list_user_subscriptions))
        .route("/user/:user_id/upcoming-renewals", get(upcoming_renewals))
}

/// Complete subscription module router, suitable for mounting under
/// `/api/v1`.
pub fn subscription_router() -> Router<SubscriptionAppState> {
    Router::new().nest("/subscriptions", subscription_routes())
}
