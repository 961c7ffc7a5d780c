//! Diet plan routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::DietService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gym_shared::types::DietPlanResponse;

pub fn diet_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/plan", get(active_plan))
}

/// POST /api/v1/diet/generate
///
/// Regenerating replaces the caller's active plan in place.
async fn generate(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<(StatusCode, Json<DietPlanResponse>)> {
    let plan = DietService::generate(state.db(), auth_user.user_id, auth_user.user_id).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/diet/plan
async fn active_plan(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<DietPlanResponse>> {
    let plan = DietService::get_active(state.db(), auth_user.user_id).await?;
    Ok(Json(plan))
}
