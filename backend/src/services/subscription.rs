//! Subscription service
//!
//! The end date is never taken from clients; it is always derived from the
//! start date and the duration.

use crate::error::ApiError;
use crate::repositories::{
    CreateSubscription, SubscriptionRecord, SubscriptionRepository, UpdateSubscription,
};
use crate::services::store::decimal_to_f64;
use chrono::{DateTime, Utc};
use gym_shared::types::{SubscriptionResponse, UpdateSubscriptionRequest};
use gym_shared::{
    subscription_end_date, PaymentMethod, PaymentStatus, SubscriptionPlanType, SubscriptionStatus,
    MAX_SUBSCRIPTION_DAYS,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

fn parse_column<T>(value: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e: String| ApiError::Internal(anyhow::anyhow!(e)))
}

fn period_end(start: DateTime<Utc>, duration_days: i32) -> Result<DateTime<Utc>, ApiError> {
    subscription_end_date(start, duration_days).ok_or_else(|| {
        ApiError::validation(
            "duration_days",
            "Subscription period ends outside the supported date range",
        )
    })
}

/// Convert a stored subscription into its public representation
pub(crate) fn subscription_response(
    record: SubscriptionRecord,
) -> Result<SubscriptionResponse, ApiError> {
    Ok(SubscriptionResponse {
        id: record.id.to_string(),
        user_id: record.user_id.to_string(),
        plan_type: parse_column::<SubscriptionPlanType>(&record.plan_type)?,
        plan_name: record.plan_name,
        price: decimal_to_f64(&record.price),
        duration_days: record.duration_days,
        start_date: record.start_date,
        end_date: record.end_date,
        status: parse_column::<SubscriptionStatus>(&record.status)?,
        payment_status: parse_column::<PaymentStatus>(&record.payment_status)?,
        payment_method: parse_column::<PaymentMethod>(&record.payment_method)?,
        features: record.features,
        auto_renew: record.auto_renew,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

/// Validate a partial update and recompute the end date when the period moves
pub(crate) fn subscription_changes(
    current: &SubscriptionRecord,
    req: UpdateSubscriptionRequest,
) -> Result<UpdateSubscription, ApiError> {
    if let Some(price) = req.price {
        if !price.is_finite() || price < 0.0 {
            return Err(ApiError::validation("price", "Price cannot be negative"));
        }
    }
    if let Some(days) = req.duration_days {
        if days < 1 {
            return Err(ApiError::validation(
                "duration_days",
                "Duration must be at least 1 day",
            ));
        }
        if days > MAX_SUBSCRIPTION_DAYS {
            return Err(ApiError::validation(
                "duration_days",
                format!("Duration must be at most {} days", MAX_SUBSCRIPTION_DAYS),
            ));
        }
    }
    if let Some(name) = &req.plan_name {
        if name.trim().is_empty() {
            return Err(ApiError::validation("plan_name", "Plan name cannot be empty"));
        }
    }

    let end_date = if req.start_date.is_some() || req.duration_days.is_some() {
        let start = req.start_date.unwrap_or(current.start_date);
        let days = req.duration_days.unwrap_or(current.duration_days);
        Some(period_end(start, days)?)
    } else {
        None
    };

    Ok(UpdateSubscription {
        plan_type: req.plan_type.map(|t| t.to_string()),
        plan_name: req.plan_name.map(|n| n.trim().to_string()),
        price: req.price,
        duration_days: req.duration_days,
        start_date: req.start_date,
        end_date,
        status: req.status.map(|s| s.to_string()),
        payment_status: req.payment_status.map(|s| s.to_string()),
        payment_method: req.payment_method.map(|m| m.to_string()),
        features: req.features,
        auto_renew: req.auto_renew,
    })
}

pub struct SubscriptionService;

impl SubscriptionService {
    /// Open a subscription on the standard offering for `plan_type`
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        plan_type: SubscriptionPlanType,
        payment_method: PaymentMethod,
        start_date: DateTime<Utc>,
    ) -> Result<SubscriptionResponse, ApiError> {
        let offering = plan_type.offering();
        let end_date = period_end(start_date, offering.duration_days)?;
        let record = SubscriptionRepository::create(
            pool,
            CreateSubscription {
                user_id,
                plan_type: plan_type.to_string(),
                plan_name: offering.plan_name.to_string(),
                price: offering.price,
                duration_days: offering.duration_days,
                start_date,
                end_date,
                status: SubscriptionStatus::Active.to_string(),
                payment_status: PaymentStatus::Completed.to_string(),
                payment_method: payment_method.to_string(),
                features: offering.features.iter().map(|f| f.to_string()).collect(),
                auto_renew: true,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(subscription_id = %record.id, user_id = %user_id, plan = %plan_type, "Subscription created");
        subscription_response(record)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<SubscriptionResponse>, ApiError> {
        SubscriptionRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(subscription_response)
            .collect()
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<SubscriptionResponse, ApiError> {
        let record = SubscriptionRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))?;
        subscription_response(record)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdateSubscriptionRequest,
    ) -> Result<SubscriptionResponse, ApiError> {
        let current = SubscriptionRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))?;

        let changes = subscription_changes(&current, req)?;
        let record = SubscriptionRepository::update(pool, id, changes)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))?;

        info!(subscription_id = %record.id, "Subscription updated");
        subscription_response(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn record() -> SubscriptionRecord {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        SubscriptionRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_type: "premium".to_string(),
            plan_name: "Premium Monthly".to_string(),
            price: Decimal::from_str("49.99").unwrap(),
            duration_days: 30,
            start_date: start,
            end_date: subscription_end_date(start, 30).unwrap(),
            status: "active".to_string(),
            payment_status: "completed".to_string(),
            payment_method: "credit_card".to_string(),
            features: vec!["Gym access".to_string()],
            auto_renew: true,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_response_parses_enum_columns() {
        let response = subscription_response(record()).unwrap();
        assert_eq!(response.plan_type, SubscriptionPlanType::Premium);
        assert_eq!(response.payment_method, PaymentMethod::CreditCard);
        assert_eq!(response.price, 49.99);
    }

    #[test]
    fn test_duration_change_moves_end_date() {
        let changes = subscription_changes(
            &record(),
            UpdateSubscriptionRequest {
                duration_days: Some(90),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            changes.end_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_start_change_keeps_duration() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let changes = subscription_changes(
            &record(),
            UpdateSubscriptionRequest {
                start_date: Some(start),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            changes.end_date,
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_status_change_leaves_end_date() {
        let changes = subscription_changes(
            &record(),
            UpdateSubscriptionRequest {
                status: Some(SubscriptionStatus::Cancelled),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(changes.end_date.is_none());
        assert_eq!(changes.status.as_deref(), Some("cancelled"));
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let err = subscription_changes(
            &record(),
            UpdateSubscriptionRequest {
                duration_days: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn test_rejects_duration_beyond_limit() {
        let err = subscription_changes(
            &record(),
            UpdateSubscriptionRequest {
                duration_days: Some(i32::MAX),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn test_start_near_date_limit_is_rejected() {
        let start = DateTime::<Utc>::MAX_UTC - chrono::Duration::days(1);
        let err = subscription_changes(
            &record(),
            UpdateSubscriptionRequest {
                start_date: Some(start),
                ..Default::default()
            },
        )
        .unwrap_err();
        match err {
            ApiError::Validation { field, .. } => {
                assert_eq!(field.as_deref(), Some("duration_days"))
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_longest_allowed_duration_is_accepted() {
        let changes = subscription_changes(
            &record(),
            UpdateSubscriptionRequest {
                duration_days: Some(MAX_SUBSCRIPTION_DAYS),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(changes.end_date.is_some());
    }
}
