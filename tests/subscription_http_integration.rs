//! Integration tests for the subscription HTTP surface.
//!
//! Drives the full axum router against in-memory adapters: bearer-token
//! extraction, DTO deserialization, handler wiring, and the HTTP status
//! contract.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use subtrack::adapters::auth::MockAuthProvider;
use subtrack::adapters::http::subscription::{subscription_router, SubscriptionAppState};
use subtrack::adapters::http::health;
use subtrack::adapters::memory::InMemorySubscriptionRepository;
use subtrack::adapters::workflow::RecordingWorkflowDispatcher;
use subtrack::domain::foundation::{SubscriptionId, Timestamp, UserId};
use subtrack::domain::subscription::{
    BillingFrequency, Category, Currency, NewSubscription, PaymentMethod, Price, Subscription,
    SubscriptionName,
};
use subtrack::ports::SubscriptionRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    repository: Arc<InMemorySubscriptionRepository>,
}

fn test_app() -> TestApp {
    let repository = Arc::new(InMemorySubscriptionRepository::new());
    let state = SubscriptionAppState {
        subscription_repository: repository.clone(),
        // The mock treats the bearer token as the caller's user id
        auth_provider: Arc::new(MockAuthProvider::new()),
        workflow_dispatcher: Arc::new(RecordingWorkflowDispatcher::new()),
    };
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", subscription_router())
        .with_state(state);
    TestApp { router, repository }
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&UserId>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", user));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn seeded_subscription(user_id: UserId, renewal: Timestamp) -> Subscription {
    let spec = NewSubscription {
        name: SubscriptionName::new("Netflix").unwrap(),
        price: Price::new(15.49).unwrap(),
        currency: Currency::Usd,
        frequency: BillingFrequency::Monthly,
        category: Category::Entertainment,
        payment_method: PaymentMethod::new("visa **42").unwrap(),
        start_date: Timestamp::now().minus_days(30),
        renewal_date: Some(renewal),
    };
    Subscription::create(SubscriptionId::new(), user_id, spec, Timestamp::now()).unwrap()
}

fn create_body() -> Value {
    json!({
        "name": "Netflix",
        "price": 15.49,
        "frequency": "monthly",
        "category": "entertainment",
        "payment_method": "visa **42",
        "start_date": Timestamp::now().minus_days(1).to_string()
    })
}

// =============================================================================
// Health and authentication
// =============================================================================

#[tokio::test]
async fn health_is_open() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = test_app();
    let (status, body) =
        send(&app, Method::GET, "/api/v1/subscriptions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_returns_201_with_derived_renewal() {
    let app = test_app();
    let user = UserId::new();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/subscriptions",
        Some(&user),
        Some(create_body()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let subscription = &body["subscription"];
    assert_eq!(subscription["status"], "active");
    assert_eq!(subscription["user_id"], user.to_string());
    assert_eq!(subscription["currency"], "USD");

    let stored = app.repository.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].renewal_date, stored[0].start_date.add_days(30));
}

#[tokio::test]
async fn create_rejects_future_start_date() {
    let app = test_app();
    let mut body = create_body();
    body["start_date"] = json!(Timestamp::now().add_days(3).to_string());

    let (status, response) = send(
        &app,
        Method::POST,
        "/api/v1/subscriptions",
        Some(&UserId::new()),
        Some(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "VALIDATION_FAILED");
    assert!(app.repository.snapshot().is_empty());
}

// =============================================================================
// Get / ownership
// =============================================================================

#[tokio::test]
async fn owner_reads_subscription_other_caller_is_forbidden() {
    let app = test_app();
    let owner = UserId::new();
    let sub = seeded_subscription(owner, Timestamp::now().add_days(10));
    app.repository.save(&sub).await.unwrap();

    let uri = format!("/api/v1/subscriptions/{}", sub.id);
    let (status, body) = send(&app, Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], sub.id.to_string());

    let (status, body) = send(&app, Method::GET, &uri, Some(&UserId::new()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn unknown_subscription_is_404() {
    let app = test_app();
    let uri = format!("/api/v1/subscriptions/{}", SubscriptionId::new());
    let (status, body) = send(&app, Method::GET, &uri, Some(&UserId::new()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "SUBSCRIPTION_NOT_FOUND");
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn update_applies_whitelisted_and_ignores_status() {
    let app = test_app();
    let owner = UserId::new();
    let sub = seeded_subscription(owner, Timestamp::now().add_days(10));
    app.repository.save(&sub).await.unwrap();

    let uri = format!("/api/v1/subscriptions/{}", sub.id);
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&owner),
        Some(json!({ "name": "Netflix 4K", "status": "expired" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Netflix 4K");
    // The status key is not a whitelisted field and is silently dropped
    assert_eq!(body["status"], "active");
}

// =============================================================================
// Cancel
// =============================================================================

#[tokio::test]
async fn cancel_succeeds_once_then_conflicts() {
    let app = test_app();
    let owner = UserId::new();
    let sub = seeded_subscription(owner, Timestamp::now().add_days(10));
    app.repository.save(&sub).await.unwrap();

    let uri = format!("/api/v1/subscriptions/{}/cancel", sub.id);

    let (status, body) = send(&app, Method::PUT, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "canceled");

    let (status, body) = send(&app, Method::PUT, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ALREADY_CANCELED");
}

#[tokio::test]
async fn cancel_by_non_owner_is_forbidden() {
    let app = test_app();
    let sub = seeded_subscription(UserId::new(), Timestamp::now().add_days(10));
    app.repository.save(&sub).await.unwrap();

    let uri = format!("/api/v1/subscriptions/{}/cancel", sub.id);
    let (status, _) = send(&app, Method::PUT, &uri, Some(&UserId::new()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        app.repository.snapshot()[0].status,
        sub.status,
        "non-owner cancel must not change stored status"
    );
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_confirms_then_404s() {
    let app = test_app();
    let owner = UserId::new();
    let sub = seeded_subscription(owner, Timestamp::now().add_days(10));
    app.repository.save(&sub).await.unwrap();

    let uri = format!("/api/v1/subscriptions/{}", sub.id);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Subscription deleted successfully");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Listings and upcoming renewals
// =============================================================================

#[tokio::test]
async fn user_listing_enforces_caller_identity() {
    let app = test_app();
    let owner = UserId::new();
    app.repository
        .save(&seeded_subscription(owner, Timestamp::now().add_days(10)))
        .await
        .unwrap();

    let uri = format!("/api/v1/subscriptions/user/{}", owner);

    let (status, body) = send(&app, Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subscriptions"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, &uri, Some(&UserId::new()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn upcoming_renewals_applies_the_seven_day_window() {
    let app = test_app();
    let owner = UserId::new();

    let due = seeded_subscription(owner, Timestamp::now().add_days(4));
    let outside = seeded_subscription(owner, Timestamp::now().add_days(9));
    let mut canceled = seeded_subscription(owner, Timestamp::now().add_days(4));
    canceled.cancel(Timestamp::now()).unwrap();
    let foreign = seeded_subscription(UserId::new(), Timestamp::now().add_days(4));
    for sub in [&due, &outside, &canceled, &foreign] {
        app.repository.save(sub).await.unwrap();
    }

    let uri = format!("/api/v1/subscriptions/user/{}/upcoming-renewals", owner);
    let (status, body) = send(&app, Method::GET, &uri, Some(&owner), None).await;

    assert_eq!(status, StatusCode::OK);
    let listed = body["subscriptions"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], due.id.to_string());

    // A different caller cannot read another user's renewal schedule
    let (status, _) = send(&app, Method::GET, &uri, Some(&UserId::new()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
