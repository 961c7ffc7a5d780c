//! Fitness goals and the calorie/macro policy attached to each
//!
//! The policy table is pure data: a goal maps to a calorie adjustment factor
//! applied to BMR and to the share of calories taken from each macronutrient.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Energy density of protein and carbohydrate (kcal per gram)
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// Energy density of fat (kcal per gram)
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Fitness goal selected by the user
///
/// Values outside the four known goals are kept as `Unrecognized` rather
/// than rejected, so rows written by older clients still produce a plan
/// from the fallback entries of each table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Fitness,
    Maintenance,
    Unrecognized(String),
}

impl FitnessGoal {
    pub const KNOWN: [FitnessGoal; 4] = [
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Fitness,
        FitnessGoal::Maintenance,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            FitnessGoal::WeightLoss => "weight_loss",
            FitnessGoal::MuscleGain => "muscle_gain",
            FitnessGoal::Fitness => "fitness",
            FitnessGoal::Maintenance => "maintenance",
            FitnessGoal::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, FitnessGoal::Unrecognized(_))
    }

    /// Calorie and macro policy for this goal
    pub fn policy(&self) -> GoalPolicy {
        GoalPolicy::for_goal(self)
    }
}

impl From<&str> for FitnessGoal {
    fn from(value: &str) -> Self {
        match value {
            "weight_loss" => FitnessGoal::WeightLoss,
            "muscle_gain" => FitnessGoal::MuscleGain,
            "fitness" => FitnessGoal::Fitness,
            "maintenance" => FitnessGoal::Maintenance,
            other => FitnessGoal::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for FitnessGoal {
    fn from(value: String) -> Self {
        FitnessGoal::from(value.as_str())
    }
}

impl From<FitnessGoal> for String {
    fn from(goal: FitnessGoal) -> Self {
        match goal {
            FitnessGoal::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for FitnessGoal {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FitnessGoal::from(s))
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Goal Policy Table
// ============================================================================

/// Calorie factor and macro ratios for a goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalPolicy {
    /// Multiplier applied to BMR to get the daily calorie target
    pub calorie_factor: f64,
    pub protein_ratio: f64,
    pub carbs_ratio: f64,
    pub fats_ratio: f64,
}

impl GoalPolicy {
    pub fn for_goal(goal: &FitnessGoal) -> Self {
        let (calorie_factor, protein_ratio, carbs_ratio, fats_ratio) = match goal {
            FitnessGoal::WeightLoss => (0.85, 0.35, 0.35, 0.30),
            FitnessGoal::MuscleGain => (1.15, 0.30, 0.45, 0.25),
            FitnessGoal::Fitness => (1.05, 0.25, 0.50, 0.25),
            FitnessGoal::Maintenance => (1.00, 0.20, 0.55, 0.25),
            FitnessGoal::Unrecognized(_) => (1.00, 0.25, 0.50, 0.25),
        };
        Self {
            calorie_factor,
            protein_ratio,
            carbs_ratio,
            fats_ratio,
        }
    }

    /// Daily calorie target for a given BMR (unrounded)
    pub fn daily_calories(&self, bmr: f64) -> f64 {
        bmr * self.calorie_factor
    }

    /// Daily macro totals in grams for a calorie target
    pub fn daily_macros(&self, daily_calories: f64) -> MacroGrams {
        MacroGrams::from_calories(
            daily_calories,
            self.protein_ratio,
            self.carbs_ratio,
            self.fats_ratio,
        )
    }
}

/// Macronutrient amounts in whole grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
}

impl MacroGrams {
    /// Split `calories` by the given ratios using the 4/4/9 kcal-per-gram rule
    pub fn from_calories(calories: f64, protein_ratio: f64, carbs_ratio: f64, fats_ratio: f64) -> Self {
        Self {
            protein: (calories * protein_ratio / KCAL_PER_GRAM_PROTEIN).round() as i32,
            carbs: (calories * carbs_ratio / KCAL_PER_GRAM_CARBS).round() as i32,
            fats: (calories * fats_ratio / KCAL_PER_GRAM_FAT).round() as i32,
        }
    }

    /// Calories represented by these grams
    pub fn calories(&self) -> f64 {
        self.protein as f64 * KCAL_PER_GRAM_PROTEIN
            + self.carbs as f64 * KCAL_PER_GRAM_CARBS
            + self.fats as f64 * KCAL_PER_GRAM_FAT
    }
}
