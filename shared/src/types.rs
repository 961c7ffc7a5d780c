//! API request and response types

use crate::diet::Meal;
use crate::goals::FitnessGoal;
use crate::health_metrics::BmiCategory;
use crate::models::{PaymentMethod, PaymentStatus, Role, SubscriptionPlanType, SubscriptionStatus};
use crate::workout::{Difficulty, Exercise};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
    pub gender: String,
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    pub fitness_goal: String,
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Tokens plus the authenticated account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: AuthTokens,
    pub user: UserResponse,
}

/// Stateless BMI calculator request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiRequest {
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
}

// ============================================================================
// Account Types
// ============================================================================

/// Account as returned to clients (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub fitness_goal: FitnessGoal,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub role: Role,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update by the account owner
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Height in cm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Weight in kg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
}

/// Partial account update by an administrator
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminUpdateUserRequest {
    #[serde(flatten)]
    pub profile: UpdateProfileRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ============================================================================
// Plan Types
// ============================================================================

/// Stored diet plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietPlanResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub fitness_goal: FitnessGoal,
    pub bmi_category: BmiCategory,
    pub total_calories: i32,
    pub total_protein: i32,
    pub total_carbs: i32,
    pub total_fats: i32,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snacks: Vec<Meal>,
    pub is_active: bool,
    /// Account that triggered the last generation, if it still exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrative override of a diet plan
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateDietPlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_protein: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_carbs: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fats: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<Meal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Meal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner: Option<Meal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snacks: Option<Vec<Meal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Stored workout plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub fitness_goal: FitnessGoal,
    pub difficulty: Difficulty,
    pub duration_minutes: i32,
    pub exercises: Vec<Exercise>,
    pub is_active: bool,
    /// Account that triggered the last generation, if it still exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrative override of a workout plan
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateWorkoutPlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ============================================================================
// Subscription Types
// ============================================================================

/// Stored subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub user_id: String,
    pub plan_type: SubscriptionPlanType,
    pub plan_name: String,
    pub price: f64,
    pub duration_days: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub features: Vec<String>,
    pub auto_renew: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial subscription update by an administrator
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateSubscriptionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<SubscriptionPlanType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

// ============================================================================
// Admin Dashboard Types
// ============================================================================

/// Aggregate counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub active_users: i64,
    pub total_diet_plans: i64,
    pub total_workout_plans: i64,
    pub active_subscriptions: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_users: Vec<UserResponse>,
    pub recent_subscriptions: Vec<SubscriptionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_flattens_tokens() {
        let now = Utc::now();
        let response = AuthResponse {
            tokens: AuthTokens {
                access_token: "a".into(),
                refresh_token: "r".into(),
                token_type: "Bearer".into(),
                expires_in: 900,
            },
            user: UserResponse {
                id: "1".into(),
                name: "Jane".into(),
                email: "jane@example.com".into(),
                age: 28,
                gender: "female".into(),
                height: 165.0,
                weight: 60.0,
                fitness_goal: FitnessGoal::WeightLoss,
                bmi: 22.0,
                bmi_category: BmiCategory::Normal,
                role: Role::User,
                is_active: true,
                last_login: None,
                created_at: now,
                updated_at: now,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["access_token"], "a");
        assert_eq!(json["user"]["fitness_goal"], "weight_loss");
        assert_eq!(json["user"]["bmi_category"], "Normal");
        assert!(json["user"].get("last_login").is_none());
    }

    #[test]
    fn test_admin_update_accepts_profile_fields() {
        let req: AdminUpdateUserRequest =
            serde_json::from_str(r#"{"weight": 82.5, "role": "admin", "is_active": false}"#)
                .unwrap();
        assert_eq!(req.profile.weight, Some(82.5));
        assert_eq!(req.role.as_deref(), Some("admin"));
        assert_eq!(req.is_active, Some(false));
        assert!(req.profile.height.is_none());
    }
}
