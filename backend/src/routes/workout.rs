//! Workout plan routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gym_shared::types::WorkoutPlanResponse;

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/plan", get(active_plan))
}

/// POST /api/v1/workout/generate
async fn generate(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<(StatusCode, Json<WorkoutPlanResponse>)> {
    let plan = WorkoutService::generate(state.db(), auth_user.user_id, auth_user.user_id).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/workout/plan
async fn active_plan(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<WorkoutPlanResponse>> {
    let plan = WorkoutService::get_active(state.db(), auth_user.user_id).await?;
    Ok(Json(plan))
}
