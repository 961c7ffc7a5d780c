//! Administration routes
//!
//! Every handler takes an [`AdminUser`], so non-admin callers get 403 before
//! any work is done.

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::services::{AdminService, SubscriptionService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use gym_shared::types::{
    AdminUpdateUserRequest, DashboardResponse, DietPlanResponse, MessageResponse,
    SubscriptionResponse, UpdateDietPlanRequest, UpdateSubscriptionRequest,
    UpdateWorkoutPlanRequest, UserResponse, WorkoutPlanResponse,
};
use uuid::Uuid;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/diet-plans", get(list_diet_plans))
        .route("/diet-plans/:id", get(get_diet_plan).put(update_diet_plan))
        .route("/workout-plans", get(list_workout_plans))
        .route(
            "/workout-plans/:id",
            get(get_workout_plan).put(update_workout_plan),
        )
        .route("/subscriptions", get(list_subscriptions))
        .route(
            "/subscriptions/:id",
            get(get_subscription).put(update_subscription),
        )
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", raw)))
}

/// GET /api/v1/admin/dashboard
async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<DashboardResponse>> {
    Ok(Json(AdminService::dashboard(state.db()).await?))
}

// ============================================================================
// Users
// ============================================================================

async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    Ok(Json(AdminService::list_users(state.db()).await?))
}

async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    Ok(Json(AdminService::get_user(state.db(), parse_id(&id)?).await?))
}

async fn update_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<AdminUpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = AdminService::update_user(state.db(), admin.user_id, parse_id(&id)?, req).await?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    AdminService::delete_user(state.db(), admin.user_id, parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}

// ============================================================================
// Plans
// ============================================================================

async fn list_diet_plans(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<DietPlanResponse>>> {
    Ok(Json(AdminService::list_diet_plans(state.db()).await?))
}

async fn get_diet_plan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DietPlanResponse>> {
    Ok(Json(AdminService::get_diet_plan(state.db(), parse_id(&id)?).await?))
}

async fn update_diet_plan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateDietPlanRequest>,
) -> ApiResult<Json<DietPlanResponse>> {
    let plan = AdminService::update_diet_plan(state.db(), parse_id(&id)?, req).await?;
    Ok(Json(plan))
}

async fn list_workout_plans(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<WorkoutPlanResponse>>> {
    Ok(Json(AdminService::list_workout_plans(state.db()).await?))
}

async fn get_workout_plan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<WorkoutPlanResponse>> {
    Ok(Json(
        AdminService::get_workout_plan(state.db(), parse_id(&id)?).await?,
    ))
}

async fn update_workout_plan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateWorkoutPlanRequest>,
) -> ApiResult<Json<WorkoutPlanResponse>> {
    let plan = AdminService::update_workout_plan(state.db(), parse_id(&id)?, req).await?;
    Ok(Json(plan))
}

// ============================================================================
// Subscriptions
// ============================================================================

async fn list_subscriptions(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<SubscriptionResponse>>> {
    Ok(Json(SubscriptionService::list(state.db()).await?))
}

async fn get_subscription(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<SubscriptionResponse>> {
    Ok(Json(SubscriptionService::get(state.db(), parse_id(&id)?).await?))
}

async fn update_subscription(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateSubscriptionRequest>,
) -> ApiResult<Json<SubscriptionResponse>> {
    let subscription = SubscriptionService::update(state.db(), parse_id(&id)?, req).await?;
    Ok(Json(subscription))
}
