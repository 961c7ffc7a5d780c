//! Gym Management Shared Library
//!
//! Pure plan generation core plus the types, models and validation shared
//! by the backend and WASM modules.

pub mod diet;
pub mod errors;
pub mod goals;
pub mod health_metrics;
pub mod models;
pub mod types;
pub mod validation;
pub mod workout;

// Re-export commonly used items
pub use diet::{generate_diet_plan, DietPlanDraft, Meal};
pub use errors::*;
pub use goals::{FitnessGoal, GoalPolicy, MacroGrams};
pub use health_metrics::*;
pub use models::{
    subscription_end_date, PaymentMethod, PaymentStatus, Role, SubscriptionPlanType,
    SubscriptionStatus, MAX_SUBSCRIPTION_DAYS,
};
pub use types::*;
pub use workout::{
    calculate_workout_duration, determine_difficulty, generate_workout_plan, Difficulty, Exercise,
    WorkoutPlanDraft,
};
