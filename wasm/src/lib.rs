//! Gym Management WASM Module
//!
//! Browser bindings for the plan calculations, so the client can preview
//! BMI, calorie targets and session length before a plan is generated.

use gym_shared::{
    calculate_bmi_result, calculate_bmr, BmiResult, calculate_workout_duration, generate_diet_plan,
    validation, workout::exercises_for_goal, FitnessGoal, Gender, UserProfile,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// BMI for measurements the server would accept
fn checked_bmi(height_cm: f64, weight_kg: f64) -> Option<BmiResult> {
    validation::validate_height_cm(height_cm).ok()?;
    validation::validate_weight(weight_kg).ok()?;
    Some(calculate_bmi_result(height_cm, weight_kg))
}

/// BMI from height (cm) and weight (kg), rounded to one decimal
///
/// Returns 0.0 for out-of-range measurements.
#[wasm_bindgen]
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    checked_bmi(height_cm, weight_kg).map_or(0.0, |r| r.bmi)
}

/// BMI category label for height (cm) and weight (kg)
///
/// Returns an empty string for out-of-range measurements.
#[wasm_bindgen]
pub fn bmi_category(height_cm: f64, weight_kg: f64) -> String {
    checked_bmi(height_cm, weight_kg)
        .map(|r| r.category.to_string())
        .unwrap_or_default()
}

/// Harris-Benedict BMR; throws for genders the equation does not cover
#[wasm_bindgen]
pub fn basal_metabolic_rate(
    gender: &str,
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
) -> Result<f64, JsValue> {
    let gender: Gender = gender.parse().map_err(|e: String| JsValue::from_str(&e))?;
    calculate_bmr(gender, weight_kg, height_cm, age_years)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Client-side check of an email address before registration
#[wasm_bindgen]
pub fn is_valid_email(email: &str) -> bool {
    validation::validate_email(email).is_ok()
}

/// Estimated session length in minutes for a goal's exercise list
#[wasm_bindgen]
pub fn workout_duration_minutes(fitness_goal: &str) -> i32 {
    calculate_workout_duration(&exercises_for_goal(&FitnessGoal::from(fitness_goal)))
}

#[derive(Serialize)]
struct DietPreview {
    total_calories: i32,
    total_protein: i32,
    total_carbs: i32,
    total_fats: i32,
}

/// Daily calorie and macro totals as a JSON string
#[wasm_bindgen]
pub fn diet_preview_json(
    gender: &str,
    age_years: i32,
    height_cm: f64,
    weight_kg: f64,
    fitness_goal: &str,
) -> Result<String, JsValue> {
    let gender: Gender = gender.parse().map_err(|e: String| JsValue::from_str(&e))?;
    let profile = UserProfile {
        gender,
        age: age_years,
        height_cm,
        weight_kg,
        fitness_goal: FitnessGoal::from(fitness_goal),
    };
    let plan = generate_diet_plan(&profile).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let preview = DietPreview {
        total_calories: plan.total_calories,
        total_protein: plan.total_protein,
        total_carbs: plan.total_carbs,
        total_fats: plan.total_fats,
    };
    serde_json::to_string(&preview).map_err(|e| JsValue::from_str(&e.to_string()))
}
