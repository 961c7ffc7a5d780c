//! Error types for the plan generation core

use thiserror::Error;

/// Errors raised while deriving metrics or generating plans
///
/// Every other step of plan generation is total once the profile has passed
/// validation, so this enum is intentionally small.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("BMR is only defined for male and female profiles, got '{0}'")]
    UnsupportedGender(String),
}
