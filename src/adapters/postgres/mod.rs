//! PostgreSQL adapters - Database implementations for repository ports.

mod subscription_repository;

pub use subscription_repository::PostgresSubscriptionRepository;
