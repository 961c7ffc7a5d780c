//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod diet_plan;
pub mod subscription;
pub mod user;
pub mod workout_plan;

pub use diet_plan::{DietPlanRecord, DietPlanRepository, UpdateDietPlan};
pub use subscription::{
    CreateSubscription, SubscriptionRecord, SubscriptionRepository, UpdateSubscription,
};
pub use user::{CreateUser, UpdateUser, UserRecord, UserRepository};
pub use workout_plan::{UpdateWorkoutPlan, WorkoutPlanRecord, WorkoutPlanRepository};

use anyhow::Result;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Convert a validated float into a NUMERIC bind value
pub(crate) fn to_decimal(value: f64) -> Result<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| anyhow::anyhow!("{} is not a storable number", value))
}
