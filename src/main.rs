//! Subtrack server binary.
//!
//! Explicit resource lifecycle: configuration is loaded and validated,
//! the connection pool is opened once at startup and passed into the
//! adapters, and the pool is closed after graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use subtrack::adapters::auth::JwtAuthProvider;
use subtrack::adapters::http::subscription::{subscription_router, SubscriptionAppState};
use subtrack::adapters::http::health;
use subtrack::adapters::postgres::PostgresSubscriptionRepository;
use subtrack::adapters::workflow::LoggingWorkflowDispatcher;
use subtrack::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {err}");
        std::process::exit(1);
    }

    init_tracing(&config);

    if let Err(err) = run(config).await {
        error!(error = %err, "server exited with error");
        std::process::exit(1);
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Open the pool once; every adapter borrows this handle.
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    info!("database pool ready");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("migrations applied");
    }

    let state = SubscriptionAppState {
        subscription_repository: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        auth_provider: Arc::new(JwtAuthProvider::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_secs,
        )),
        workflow_dispatcher: Arc::new(LoggingWorkflowDispatcher::new()),
    };

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", subscription_router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(cors_layer(&config)),
        );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Explicit teardown of the shared handle.
    pool.close().await;
    info!("database pool closed, goodbye");
    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse::<http::HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                http::Method::GET,
                http::Method::POST,
                http::Method::PUT,
                http::Method::DELETE,
            ])
            .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
