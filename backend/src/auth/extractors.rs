//! Request extractors for authenticated and administrative callers

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use gym_shared::models::Role;
use uuid::Uuid;

/// Authenticated user extracted from a bearer access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = bearer_token(parts)?;

        let claims = app_state
            .jwt()
            .validate_access_token(token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;
        let user_id = claims
            .user_id()
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        Ok(AuthUser { user_id })
    }
}

/// Authenticated administrator
///
/// The role is read from the account on every request, so demoting or
/// deactivating an admin takes effect without waiting for token expiry.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser { user_id } = AuthUser::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let user = UserRepository::find_by_id(app_state.db(), user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        if !user.is_active {
            return Err(ApiError::Unauthorized("Account is disabled".to_string()));
        }
        if user.role != Role::Admin.as_str() {
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }

        Ok(AdminUser { user_id })
    }
}
