//! PostgreSQL implementation of SubscriptionRepository.
//!
//! Provides persistent storage for Subscription aggregates using sqlx
//! with an injected connection pool.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, SubscriptionId, Timestamp, UserId,
};
use crate::domain::subscription::{
    BillingFrequency, Category, Currency, PaymentMethod, Price, Subscription,
    SubscriptionName, SubscriptionStatus,
};
use crate::ports::SubscriptionRepository;

/// PostgreSQL implementation of the SubscriptionRepository port.
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Creates a new repository around the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    price: f64,
    currency: String,
    frequency: String,
    category: String,
    payment_method: String,
    status: String,
    start_date: DateTime<Utc>,
    renewal_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            name: SubscriptionName::new(row.name).map_err(row_error)?,
            price: Price::new(row.price).map_err(row_error)?,
            currency: parse_currency(&row.currency)?,
            frequency: parse_frequency(&row.frequency)?,
            category: parse_category(&row.category)?,
            payment_method: PaymentMethod::new(row.payment_method).map_err(row_error)?,
            status: parse_status(&row.status)?,
            start_date: Timestamp::from_datetime(row.start_date),
            renewal_date: Timestamp::from_datetime(row.renewal_date),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn row_error(err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid subscription row: {}", err),
    )
}

fn parse_currency(s: &str) -> Result<Currency, DomainError> {
    match s {
        "USD" => Ok(Currency::Usd),
        "EUR" => Ok(Currency::Eur),
        "GBP" => Ok(Currency::Gbp),
        "ETB" => Ok(Currency::Etb),
        _ => Err(row_error(format!("unknown currency '{}'", s))),
    }
}

fn parse_frequency(s: &str) -> Result<BillingFrequency, DomainError> {
    match s {
        "daily" => Ok(BillingFrequency::Daily),
        "weekly" => Ok(BillingFrequency::Weekly),
        "monthly" => Ok(BillingFrequency::Monthly),
        "yearly" => Ok(BillingFrequency::Yearly),
        _ => Err(row_error(format!("unknown frequency '{}'", s))),
    }
}

fn parse_category(s: &str) -> Result<Category, DomainError> {
    match s {
        "sports" => Ok(Category::Sports),
        "news" => Ok(Category::News),
        "entertainment" => Ok(Category::Entertainment),
        "other" => Ok(Category::Other),
        _ => Err(row_error(format!("unknown category '{}'", s))),
    }
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    match s {
        "active" => Ok(SubscriptionStatus::Active),
        "canceled" => Ok(SubscriptionStatus::Canceled),
        "expired" => Ok(SubscriptionStatus::Expired),
        _ => Err(row_error(format!("unknown status '{}'", s))),
    }
}

fn status_to_str(status: &SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Active => "active",
        SubscriptionStatus::Canceled => "canceled",
        SubscriptionStatus::Expired => "expired",
    }
}

fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

const SELECT_COLUMNS: &str = "id, user_id, name, price, currency, frequency, category, \
     payment_method, status, start_date, renewal_date, created_at, updated_at";

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, name, price, currency, frequency, category,
                payment_method, status, start_date, renewal_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.user_id.as_uuid())
        .bind(subscription.name.as_str())
        .bind(subscription.price.amount())
        .bind(subscription.currency.as_str())
        .bind(subscription.frequency.as_str())
        .bind(subscription.category.as_str())
        .bind(subscription.payment_method.as_str())
        .bind(status_to_str(&subscription.status))
        .bind(subscription.start_date.as_datetime())
        .bind(subscription.renewal_date.as_datetime())
        .bind(subscription.created_at.as_datetime())
        .bind(subscription.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save subscription", e))?;

        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET
                name = $2,
                price = $3,
                currency = $4,
                frequency = $5,
                category = $6,
                payment_method = $7,
                status = $8,
                start_date = $9,
                renewal_date = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.name.as_str())
        .bind(subscription.price.amount())
        .bind(subscription.currency.as_str())
        .bind(subscription.frequency.as_str())
        .bind(subscription.category.as_str())
        .bind(subscription.payment_method.as_str())
        .bind(status_to_str(&subscription.status))
        .bind(subscription.start_date.as_datetime())
        .bind(subscription.renewal_date.as_datetime())
        .bind(subscription.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update subscription", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription not found: {}", subscription.id),
            ));
        }
        Ok(())
    }

    async fn update_if_status(
        &self,
        subscription: &Subscription,
        expected: SubscriptionStatus,
    ) -> Result<bool, DomainError> {
        // The WHERE clause re-checks the status at commit time; a racing
        // writer makes rows_affected come back zero.
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET
                status = $2,
                updated_at = $3
            WHERE id = $1 AND status = $4
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(status_to_str(&subscription.status))
        .bind(subscription.updated_at.as_datetime())
        .bind(status_to_str(&expected))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed conditional status update", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Distinguish a lost race from a missing row.
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM subscriptions WHERE id = $1",
        )
        .bind(subscription.id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check subscription existence", e))?;

        if exists == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription not found: {}", subscription.id),
            ));
        }
        Ok(false)
    }

    async fn find_by_id(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<Subscription>, DomainError> {
        let row = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "SELECT {} FROM subscriptions WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load subscription", e))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "SELECT {} FROM subscriptions WHERE user_id = $1 ORDER BY created_at ASC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list user subscriptions", e))?;

        rows.into_iter().map(Subscription::try_from).collect()
    }

    async fn find_all(&self) -> Result<Vec<Subscription>, DomainError> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "SELECT {} FROM subscriptions ORDER BY created_at ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list subscriptions", e))?;

        rows.into_iter().map(Subscription::try_from).collect()
    }

    async fn find_renewing_between(
        &self,
        user_id: &UserId,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Subscription>, DomainError> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "SELECT {} FROM subscriptions \
             WHERE user_id = $1 AND status = 'active' \
               AND renewal_date >= $2 AND renewal_date <= $3 \
             ORDER BY renewal_date ASC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(from.as_datetime())
        .bind(to.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to query upcoming renewals", e))?;

        rows.into_iter().map(Subscription::try_from).collect()
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete subscription", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription not found: {}", id),
            ));
        }
        Ok(())
    }
}
