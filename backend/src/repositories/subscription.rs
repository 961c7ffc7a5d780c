//! Subscription repository for database operations

use super::to_decimal;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

const SUBSCRIPTION_COLUMNS: &str = "id, user_id, plan_type, plan_name, price, duration_days, \
     start_date, end_date, status, payment_status, payment_method, features, auto_renew, \
     created_at, updated_at";

/// Subscription record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubscriptionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_type: String,
    pub plan_name: String,
    pub price: Decimal,
    pub duration_days: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    pub features: Vec<String>,
    pub auto_renew: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a subscription
#[derive(Debug, Clone)]
pub struct CreateSubscription {
    pub user_id: Uuid,
    pub plan_type: String,
    pub plan_name: String,
    pub price: f64,
    pub duration_days: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    pub features: Vec<String>,
    pub auto_renew: bool,
}

/// Partial update; `None` leaves the column unchanged
///
/// `end_date` is expected to be recomputed by the caller whenever the start
/// or duration changes.
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscription {
    pub plan_type: Option<String>,
    pub plan_name: Option<String>,
    pub price: Option<f64>,
    pub duration_days: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub features: Option<Vec<String>>,
    pub auto_renew: Option<bool>,
}

pub struct SubscriptionRepository;

impl SubscriptionRepository {
    pub async fn create(pool: &PgPool, input: CreateSubscription) -> Result<SubscriptionRecord> {
        let sql = format!(
            r#"
            INSERT INTO subscriptions (user_id, plan_type, plan_name, price, duration_days,
                                       start_date, end_date, status, payment_status,
                                       payment_method, features, auto_renew)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        );
        let record = sqlx::query_as::<_, SubscriptionRecord>(&sql)
            .bind(input.user_id)
            .bind(&input.plan_type)
            .bind(&input.plan_name)
            .bind(to_decimal(input.price)?)
            .bind(input.duration_days)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .bind(&input.payment_status)
            .bind(&input.payment_method)
            .bind(&input.features)
            .bind(input.auto_renew)
            .fetch_one(pool)
            .await?;
        Ok(record)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<SubscriptionRecord>> {
        let sql = format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = $1");
        let record = sqlx::query_as::<_, SubscriptionRecord>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(record)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: UpdateSubscription,
    ) -> Result<Option<SubscriptionRecord>> {
        let sql = format!(
            r#"
            UPDATE subscriptions SET
                plan_type = COALESCE($2, plan_type),
                plan_name = COALESCE($3, plan_name),
                price = COALESCE($4, price),
                duration_days = COALESCE($5, duration_days),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                status = COALESCE($8, status),
                payment_status = COALESCE($9, payment_status),
                payment_method = COALESCE($10, payment_method),
                features = COALESCE($11, features),
                auto_renew = COALESCE($12, auto_renew),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        );
        let record = sqlx::query_as::<_, SubscriptionRecord>(&sql)
            .bind(id)
            .bind(&input.plan_type)
            .bind(&input.plan_name)
            .bind(input.price.map(to_decimal).transpose()?)
            .bind(input.duration_days)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .bind(&input.payment_status)
            .bind(&input.payment_method)
            .bind(&input.features)
            .bind(input.auto_renew)
            .fetch_optional(pool)
            .await?;
        Ok(record)
    }

    /// All subscriptions, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<SubscriptionRecord>> {
        let sql =
            format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions ORDER BY created_at DESC");
        let records = sqlx::query_as::<_, SubscriptionRecord>(&sql)
            .fetch_all(pool)
            .await?;
        Ok(records)
    }

    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<SubscriptionRecord>> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions ORDER BY created_at DESC LIMIT $1"
        );
        let records = sqlx::query_as::<_, SubscriptionRecord>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(records)
    }

    pub async fn count_active(pool: &PgPool) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE status = 'active'")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
