//! Input validation functions
//!
//! Range checks for account and profile fields. Plan generation assumes a
//! profile has passed these before it is stored.

use crate::goals::FitnessGoal;
use crate::health_metrics::Gender;
use crate::models::Role;
use once_cell::sync::Lazy;
use regex_lite::Regex;

pub const MAX_NAME_LENGTH: usize = 50;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_AGE: i32 = 13;
pub const MAX_AGE: i32 = 100;
pub const MIN_HEIGHT_CM: f64 = 100.0;
pub const MAX_HEIGHT_CM: f64 = 250.0;
pub const MIN_WEIGHT_KG: f64 = 30.0;
pub const MAX_WEIGHT_KG: f64 = 300.0;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Emails are stored trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate display name (checked after trimming)
pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!("Name cannot exceed {} characters", MAX_NAME_LENGTH));
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate age in years
pub fn validate_age(age: i32) -> Result<(), String> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(format!("Age must be between {} and {}", MIN_AGE, MAX_AGE));
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < MIN_HEIGHT_CM {
        return Err(format!("Height must be at least {} cm", MIN_HEIGHT_CM));
    }
    if height_cm > MAX_HEIGHT_CM {
        return Err(format!("Height must be at most {} cm", MAX_HEIGHT_CM));
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < MIN_WEIGHT_KG {
        return Err(format!("Weight must be at least {} kg", MIN_WEIGHT_KG));
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err(format!("Weight must be at most {} kg", MAX_WEIGHT_KG));
    }
    Ok(())
}

/// Parse and validate gender
pub fn validate_gender(gender: &str) -> Result<Gender, String> {
    gender
        .parse::<Gender>()
        .map_err(|_| "Gender must be one of: male, female, other".to_string())
}

/// Validate a fitness goal submitted by a client
///
/// Stored rows may hold other values, but new input must be one of the four
/// known goals.
pub fn validate_fitness_goal(goal: &str) -> Result<FitnessGoal, String> {
    let parsed = FitnessGoal::from(goal);
    if parsed.is_recognized() {
        Ok(parsed)
    } else {
        let known: Vec<_> = FitnessGoal::KNOWN.iter().map(|g| g.as_str()).collect();
        Err(format!("Fitness goal must be one of: {}", known.join(", ")))
    }
}

/// Parse and validate account role
pub fn validate_role(role: &str) -> Result<Role, String> {
    role.parse::<Role>()
        .map_err(|_| "Role must be one of: user, admin".to_string())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "email" => "Email",
        "password" => "Password",
        "age" => "Age",
        "gender" => "Gender",
        "height" | "height_cm" => "Height",
        "weight" | "weight_kg" => "Weight",
        "fitness_goal" => "Fitness Goal",
        "role" => "Role",
        "plan_type" => "Plan Type",
        "duration_days" => "Duration",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}
