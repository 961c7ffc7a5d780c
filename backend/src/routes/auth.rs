//! Authentication and profile routes
//!
//! Registration, login, token refresh, the caller's own profile and the
//! public BMI calculator.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gym_shared::types::{
    AuthResponse, AuthTokens, BmiRequest, LoginRequest, RefreshRequest, RegisterRequest,
    UpdateProfileRequest, UserResponse,
};
use gym_shared::BmiResult;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/calculate-bmi", post(calculate_bmi))
        .route("/profile", get(get_profile).put(update_profile))
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let response = UserService::register(state.db(), state.jwt(), req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = UserService::login(state.db(), state.jwt(), &req.email, &req.password).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::refresh_token(state.db(), state.jwt(), &req.refresh_token).await?;
    Ok(Json(tokens))
}

/// POST /api/v1/auth/calculate-bmi
///
/// Public; nothing is stored.
async fn calculate_bmi(Json(req): Json<BmiRequest>) -> ApiResult<Json<BmiResult>> {
    Ok(Json(UserService::calculate_bmi(&req)?))
}

/// GET /api/v1/auth/profile
async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let profile = UserService::get_profile(state.db(), auth_user.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/auth/profile
async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let profile = UserService::update_profile(state.db(), auth_user.user_id, req).await?;
    Ok(Json(profile))
}
