//! Administration service
//!
//! Account management, plan overrides and the dashboard summary.

use crate::error::ApiError;
use crate::repositories::{
    DietPlanRepository, SubscriptionRepository, UpdateDietPlan, UpdateWorkoutPlan,
    UserRepository, WorkoutPlanRepository,
};
use crate::services::diet::diet_response;
use crate::services::subscription::subscription_response;
use crate::services::user::{prepare_profile_update, user_response};
use crate::services::workout::workout_response;
use gym_shared::types::{
    AdminUpdateUserRequest, DashboardResponse, DashboardStats, DietPlanResponse,
    UpdateDietPlanRequest, UpdateWorkoutPlanRequest, UserResponse, WorkoutPlanResponse,
};
use gym_shared::validation;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

/// Number of recent accounts and subscriptions on the dashboard
pub const DASHBOARD_RECENT_LIMIT: i64 = 5;

/// Map a failed plan override, turning a second active plan into a conflict
fn plan_update_error(err: sqlx::Error) -> ApiError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::Conflict(
            "Owner already has an active plan; deactivate it first".to_string(),
        ),
        _ => ApiError::Database(err),
    }
}

fn check_plan_name(name: &Option<String>) -> Result<(), ApiError> {
    match name {
        Some(name) if name.trim().is_empty() => {
            Err(ApiError::validation("name", "Plan name cannot be empty"))
        }
        _ => Ok(()),
    }
}

pub struct AdminService;

impl AdminService {
    /// Aggregate counts plus the most recent accounts and subscriptions
    pub async fn dashboard(pool: &PgPool) -> Result<DashboardResponse, ApiError> {
        let (total_users, active_users) = UserRepository::counts(pool)
            .await
            .map_err(ApiError::Internal)?;
        let total_diet_plans = DietPlanRepository::count(pool)
            .await
            .map_err(ApiError::Internal)?;
        let total_workout_plans = WorkoutPlanRepository::count(pool)
            .await
            .map_err(ApiError::Internal)?;
        let active_subscriptions = SubscriptionRepository::count_active(pool)
            .await
            .map_err(ApiError::Internal)?;

        let recent_users = UserRepository::recent(pool, DASHBOARD_RECENT_LIMIT)
            .await
            .map_err(ApiError::Internal)?
            .iter()
            .map(user_response)
            .collect::<Result<Vec<_>, _>>()?;
        let recent_subscriptions = SubscriptionRepository::recent(pool, DASHBOARD_RECENT_LIMIT)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(subscription_response)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DashboardResponse {
            stats: DashboardStats {
                total_users,
                active_users,
                total_diet_plans,
                total_workout_plans,
                active_subscriptions,
            },
            recent_users,
            recent_subscriptions,
        })
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn list_users(pool: &PgPool) -> Result<Vec<UserResponse>, ApiError> {
        UserRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?
            .iter()
            .map(user_response)
            .collect()
    }

    pub async fn get_user(pool: &PgPool, id: Uuid) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        user_response(&user)
    }

    /// Partial account update, including role and activation
    pub async fn update_user(
        pool: &PgPool,
        admin_id: Uuid,
        id: Uuid,
        req: AdminUpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        let current = UserRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let role = req
            .role
            .as_deref()
            .map(validation::validate_role)
            .transpose()
            .map_err(|message| ApiError::validation("role", message))?;

        let mut changes = prepare_profile_update(pool, &current, req.profile).await?;
        changes.role = role.map(|r| r.to_string());
        changes.is_active = req.is_active;

        let user = UserRepository::update(pool, id, changes)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(admin_id = %admin_id, user_id = %id, "Account updated by administrator");
        user_response(&user)
    }

    /// Delete an account together with its plans and subscriptions
    pub async fn delete_user(pool: &PgPool, admin_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        if admin_id == id {
            return Err(ApiError::BadRequest(
                "Administrators cannot delete their own account".to_string(),
            ));
        }
        let deleted = UserRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(ApiError::NotFound("User not found".to_string()));
        }
        warn!(admin_id = %admin_id, user_id = %id, "Account deleted");
        Ok(())
    }

    // ========================================================================
    // Diet plans
    // ========================================================================

    pub async fn list_diet_plans(pool: &PgPool) -> Result<Vec<DietPlanResponse>, ApiError> {
        DietPlanRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(diet_response)
            .collect()
    }

    pub async fn get_diet_plan(pool: &PgPool, id: Uuid) -> Result<DietPlanResponse, ApiError> {
        let plan = DietPlanRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Diet plan not found".to_string()))?;
        diet_response(plan)
    }

    pub async fn update_diet_plan(
        pool: &PgPool,
        id: Uuid,
        req: UpdateDietPlanRequest,
    ) -> Result<DietPlanResponse, ApiError> {
        check_plan_name(&req.name)?;
        for (field, value) in [
            ("total_calories", req.total_calories),
            ("total_protein", req.total_protein),
            ("total_carbs", req.total_carbs),
            ("total_fats", req.total_fats),
        ] {
            if matches!(value, Some(v) if v < 0) {
                return Err(ApiError::validation(field, "Value cannot be negative"));
            }
        }

        let plan = DietPlanRepository::update(
            pool,
            id,
            UpdateDietPlan {
                name: req.name.map(|n| n.trim().to_string()),
                total_calories: req.total_calories,
                total_protein: req.total_protein,
                total_carbs: req.total_carbs,
                total_fats: req.total_fats,
                breakfast: req.breakfast,
                lunch: req.lunch,
                dinner: req.dinner,
                snacks: req.snacks,
                is_active: req.is_active,
            },
        )
        .await
        .map_err(plan_update_error)?
        .ok_or_else(|| ApiError::NotFound("Diet plan not found".to_string()))?;

        info!(plan_id = %plan.id, "Diet plan overridden by administrator");
        diet_response(plan)
    }

    // ========================================================================
    // Workout plans
    // ========================================================================

    pub async fn list_workout_plans(pool: &PgPool) -> Result<Vec<WorkoutPlanResponse>, ApiError> {
        WorkoutPlanRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(workout_response)
            .collect()
    }

    pub async fn get_workout_plan(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<WorkoutPlanResponse, ApiError> {
        let plan = WorkoutPlanRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Workout plan not found".to_string()))?;
        workout_response(plan)
    }

    pub async fn update_workout_plan(
        pool: &PgPool,
        id: Uuid,
        req: UpdateWorkoutPlanRequest,
    ) -> Result<WorkoutPlanResponse, ApiError> {
        check_plan_name(&req.name)?;
        if matches!(req.duration_minutes, Some(m) if m < 1) {
            return Err(ApiError::validation(
                "duration_minutes",
                "Duration must be at least 1 minute",
            ));
        }

        let plan = WorkoutPlanRepository::update(
            pool,
            id,
            UpdateWorkoutPlan {
                name: req.name.map(|n| n.trim().to_string()),
                difficulty: req.difficulty.map(|d| d.to_string()),
                duration_minutes: req.duration_minutes,
                exercises: req.exercises,
                is_active: req.is_active,
            },
        )
        .await
        .map_err(plan_update_error)?
        .ok_or_else(|| ApiError::NotFound("Workout plan not found".to_string()))?;

        info!(plan_id = %plan.id, "Workout plan overridden by administrator");
        workout_response(plan)
    }
}
