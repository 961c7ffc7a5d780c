//! User service for authentication and profile management
//!
//! Password hashing/verification runs on the blocking thread pool; BMI is
//! recomputed whenever height or weight changes so the stored pair never
//! drifts from the body metrics.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{CreateUser, UpdateUser, UserRecord, UserRepository};
use crate::services::store::decimal_to_f64;
use gym_shared::types::{
    AuthResponse, AuthTokens, BmiRequest, RegisterRequest, UpdateProfileRequest, UserResponse,
};
use gym_shared::{calculate_bmi_result, validation, BmiCategory, BmiResult, Role};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

/// Map a shared validation failure onto the offending request field
fn check<T>(field: &str, result: Result<T, String>) -> Result<T, ApiError> {
    result.map_err(|message| ApiError::validation(field, message))
}

/// Normalize and validate an email address
fn checked_email(raw: &str) -> Result<String, ApiError> {
    let email = validation::normalize_email(raw);
    if email.len() > 255 || !email.validate_email() {
        return Err(ApiError::validation("email", "Invalid email format"));
    }
    Ok(email)
}

/// Convert a stored account into its public representation
pub(crate) fn user_response(user: &UserRecord) -> Result<UserResponse, ApiError> {
    let bmi_category: BmiCategory = user
        .bmi_category
        .parse()
        .map_err(|e: String| ApiError::Internal(anyhow::anyhow!(e)))?;
    let role: Role = user
        .role
        .parse()
        .map_err(|e: String| ApiError::Internal(anyhow::anyhow!(e)))?;

    Ok(UserResponse {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        age: user.age,
        gender: user.gender.clone(),
        height: decimal_to_f64(&user.height_cm),
        weight: decimal_to_f64(&user.weight_kg),
        fitness_goal: user.fitness_goal.as_str().into(),
        bmi: decimal_to_f64(&user.bmi),
        bmi_category,
        role,
        is_active: user.is_active,
        last_login: user.last_login,
        created_at: user.created_at,
        updated_at: user.updated_at,
    })
}

/// Validate a partial profile update against the current account
///
/// Only fields present in the request end up in the returned changes.
/// Email uniqueness and password hashing need I/O and are left to
/// [`prepare_profile_update`].
pub(crate) fn profile_changes(
    current: &UserRecord,
    req: &UpdateProfileRequest,
) -> Result<UpdateUser, ApiError> {
    let mut changes = UpdateUser::default();

    if let Some(name) = &req.name {
        check("name", validation::validate_name(name))?;
        changes.name = Some(name.trim().to_string());
    }
    if let Some(email) = &req.email {
        changes.email = Some(checked_email(email)?);
    }
    if let Some(password) = &req.password {
        check("password", validation::validate_password(password))?;
    }
    if let Some(age) = req.age {
        check("age", validation::validate_age(age))?;
        changes.age = Some(age);
    }
    if let Some(gender) = &req.gender {
        let gender = check("gender", validation::validate_gender(gender))?;
        changes.gender = Some(gender.to_string());
    }
    if let Some(height) = req.height {
        check("height", validation::validate_height_cm(height))?;
        changes.height_cm = Some(height);
    }
    if let Some(weight) = req.weight {
        check("weight", validation::validate_weight(weight))?;
        changes.weight_kg = Some(weight);
    }
    if let Some(goal) = &req.fitness_goal {
        let goal = check("fitness_goal", validation::validate_fitness_goal(goal))?;
        changes.fitness_goal = Some(goal.to_string());
    }

    if changes.height_cm.is_some() || changes.weight_kg.is_some() {
        let height = changes
            .height_cm
            .unwrap_or_else(|| decimal_to_f64(&current.height_cm));
        let weight = changes
            .weight_kg
            .unwrap_or_else(|| decimal_to_f64(&current.weight_kg));
        let bmi = calculate_bmi_result(height, weight);
        changes.bmi = Some(bmi.bmi);
        changes.bmi_category = Some(bmi.category.to_string());
    }

    Ok(changes)
}

/// Validate a partial update and resolve the parts that need I/O
pub(crate) async fn prepare_profile_update(
    pool: &PgPool,
    current: &UserRecord,
    req: UpdateProfileRequest,
) -> Result<UpdateUser, ApiError> {
    let mut changes = profile_changes(current, &req)?;

    if let Some(email) = &changes.email {
        if UserRepository::email_exists(pool, email, Some(current.id))
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }
    }

    if let Some(password) = req.password {
        let hash = PasswordService::hash(password)
            .await
            .map_err(ApiError::Internal)?;
        changes.password_hash = Some(hash);
    }

    Ok(changes)
}

fn record_login(outcome: &'static str) {
    metrics::counter!("gym_logins_total", "outcome" => outcome).increment(1);
}

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new member account
    pub async fn register(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: RegisterRequest,
    ) -> Result<AuthResponse, ApiError> {
        let name = req.name.trim().to_string();
        check("name", validation::validate_name(&name))?;
        let email = checked_email(&req.email)?;
        check("password", validation::validate_password(&req.password))?;
        check("age", validation::validate_age(req.age))?;
        let gender = check("gender", validation::validate_gender(&req.gender))?;
        check("height", validation::validate_height_cm(req.height))?;
        check("weight", validation::validate_weight(req.weight))?;
        let goal = check(
            "fitness_goal",
            validation::validate_fitness_goal(&req.fitness_goal),
        )?;

        if UserRepository::email_exists(pool, &email, None)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let bmi = calculate_bmi_result(req.height, req.weight);
        let user = UserRepository::create(
            pool,
            CreateUser {
                name,
                email,
                password_hash,
                age: req.age,
                gender: gender.to_string(),
                height_cm: req.height,
                weight_kg: req.weight,
                fitness_goal: goal.to_string(),
                bmi: bmi.bmi,
                bmi_category: bmi.category.to_string(),
                role: Role::User.to_string(),
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(user_id = %user.id, "Registered new account");

        let tokens = jwt_service
            .issue_tokens(user.id)
            .map_err(ApiError::Internal)?;
        Ok(AuthResponse {
            tokens,
            user: user_response(&user)?,
        })
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let email = validation::normalize_email(email);

        let Some(mut user) = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        else {
            record_login("failure");
            warn!("Login attempt for unknown account");
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        };

        let valid = PasswordService::verify(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;
        if !valid {
            record_login("failure");
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        if !user.is_active {
            record_login("inactive");
            warn!(user_id = %user.id, "Login attempt on deactivated account");
            return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
        }

        let last_login = UserRepository::touch_last_login(pool, user.id)
            .await
            .map_err(ApiError::Internal)?;
        user.last_login = Some(last_login);
        record_login("success");

        let tokens = jwt_service
            .issue_tokens(user.id)
            .map_err(ApiError::Internal)?;
        Ok(AuthResponse {
            tokens,
            user: user_response(&user)?,
        })
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt_service
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;
        if !user.is_active {
            return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
        }

        jwt_service
            .issue_tokens(user_id)
            .map_err(ApiError::Internal)
    }

    /// Get the caller's own account
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        user_response(&user)
    }

    /// Partially update the caller's own account
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<UserResponse, ApiError> {
        let current = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let changes = prepare_profile_update(pool, &current, req).await?;
        let user = UserRepository::update(pool, user_id, changes)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = %user.id, "Profile updated");
        user_response(&user)
    }

    /// Stateless BMI calculator
    pub fn calculate_bmi(req: &BmiRequest) -> Result<BmiResult, ApiError> {
        check("height", validation::validate_height_cm(req.height))?;
        check("weight", validation::validate_weight(req.weight))?;
        Ok(calculate_bmi_result(req.height, req.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn account() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            name: "Sarah Wilson".to_string(),
            email: "sarah@example.com".to_string(),
            password_hash: "hash".to_string(),
            age: 32,
            gender: "female".to_string(),
            height_cm: Decimal::from_str("168.00").unwrap(),
            weight_kg: Decimal::from_str("62.00").unwrap(),
            fitness_goal: "maintenance".to_string(),
            bmi: Decimal::from_str("22.0").unwrap(),
            bmi_category: "Normal".to_string(),
            role: "user".to_string(),
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn field_of(err: ApiError) -> Option<String> {
        match err {
            ApiError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_user_response_hides_password() {
        let response = user_response(&account()).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["height"], 168.0);
        assert_eq!(json["bmi_category"], "Normal");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_user_response_rejects_corrupt_category() {
        let mut user = account();
        user.bmi_category = "Huge".to_string();
        assert!(matches!(user_response(&user), Err(ApiError::Internal(_))));
    }

    #[test]
    fn test_weight_change_recomputes_bmi_with_stored_height() {
        let req = UpdateProfileRequest {
            weight: Some(85.0),
            ..Default::default()
        };
        let changes = profile_changes(&account(), &req).unwrap();
        assert_eq!(changes.weight_kg, Some(85.0));
        assert!(changes.height_cm.is_none());
        assert_eq!(changes.bmi, Some(30.1));
        assert_eq!(changes.bmi_category.as_deref(), Some("Obese"));
    }

    #[test]
    fn test_name_only_change_leaves_bmi_alone() {
        let req = UpdateProfileRequest {
            name: Some("  Sarah W.  ".to_string()),
            ..Default::default()
        };
        let changes = profile_changes(&account(), &req).unwrap();
        assert_eq!(changes.name.as_deref(), Some("Sarah W."));
        assert!(changes.bmi.is_none());
        assert!(changes.bmi_category.is_none());
    }

    #[test]
    fn test_email_is_normalized() {
        let req = UpdateProfileRequest {
            email: Some(" Sarah@Example.COM ".to_string()),
            ..Default::default()
        };
        let changes = profile_changes(&account(), &req).unwrap();
        assert_eq!(changes.email.as_deref(), Some("sarah@example.com"));
    }

    #[test]
    fn test_invalid_fields_are_reported_by_name() {
        let cases = [
            (
                UpdateProfileRequest {
                    age: Some(12),
                    ..Default::default()
                },
                "age",
            ),
            (
                UpdateProfileRequest {
                    height: Some(99.0),
                    ..Default::default()
                },
                "height",
            ),
            (
                UpdateProfileRequest {
                    fitness_goal: Some("bulking".to_string()),
                    ..Default::default()
                },
                "fitness_goal",
            ),
            (
                UpdateProfileRequest {
                    password: Some("123".to_string()),
                    ..Default::default()
                },
                "password",
            ),
            (
                UpdateProfileRequest {
                    email: Some("not-an-email".to_string()),
                    ..Default::default()
                },
                "email",
            ),
        ];
        for (req, field) in cases {
            let err = profile_changes(&account(), &req).unwrap_err();
            assert_eq!(field_of(err).as_deref(), Some(field));
        }
    }

    #[test]
    fn test_calculate_bmi() {
        let result = UserService::calculate_bmi(&BmiRequest {
            height: 180.0,
            weight: 75.0,
        })
        .unwrap();
        assert_eq!(result.bmi, 23.1);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_calculate_bmi_rejects_out_of_range_height() {
        let err = UserService::calculate_bmi(&BmiRequest {
            height: 0.0,
            weight: 75.0,
        })
        .unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("height"));
    }
}
