//! Body metric calculations
//!
//! Provides BMI classification and Harris-Benedict BMR, the two inputs every
//! generated plan is derived from.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no I/O, no clocks, identical output for identical input
//! 2. **SI Units**: heights in centimeters, weights in kilograms
//! 3. **Explicit Gaps**: inputs a formula does not cover are reported as errors

use crate::errors::PlanError;
use crate::goals::FitnessGoal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender as declared on the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// The subset of an account that plan generation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    /// Age in whole years
    pub age: i32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub fitness_goal: FitnessGoal,
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    /// Half-open BMI range `[min, max)` covered by this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (f64::NEG_INFINITY, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BmiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BmiCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown BMI category: {}", s))
    }
}

/// BMI calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal place
    pub bmi: f64,
    pub category: BmiCategory,
}

/// Calculate raw BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Round to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Calculate the stored BMI result
///
/// The category is taken from the rounded value so that the persisted pair
/// is always self-consistent.
pub fn calculate_bmi_result(height_cm: f64, weight_kg: f64) -> BmiResult {
    let bmi = round_to_tenth(calculate_bmi(weight_kg, height_cm));
    BmiResult {
        bmi,
        category: classify_bmi(bmi),
    }
}

// ============================================================================
// BMR Calculations
// ============================================================================

/// Calculate BMR using the revised Harris-Benedict equation
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
///
/// The equation has no coefficients for other genders; those profiles get
/// [`PlanError::UnsupportedGender`].
pub fn calculate_bmr(
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
) -> Result<f64, PlanError> {
    let age = age_years as f64;
    match gender {
        Gender::Male => Ok(88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age),
        Gender::Female => Ok(447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age),
        Gender::Other => Err(PlanError::UnsupportedGender(gender.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let result = calculate_bmi_result(175.0, 70.0);
        assert_eq!(result.bmi, 22.9);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[rstest]
    #[case(18.4, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.9, BmiCategory::Normal)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.9, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::Obese)]
    #[case(45.0, BmiCategory::Obese)]
    fn test_bmi_category_boundaries(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify_bmi(bmi), expected);
    }

    #[test]
    fn test_category_uses_rounded_value() {
        // 180cm / 80.99kg -> 24.997 which rounds to 25.0
        let result = calculate_bmi_result(180.0, 80.99);
        assert_eq!(result.bmi, 25.0);
        assert_eq!(result.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_bmi_category_parse() {
        assert_eq!("obese".parse::<BmiCategory>().unwrap(), BmiCategory::Obese);
        assert_eq!("Normal".parse::<BmiCategory>().unwrap(), BmiCategory::Normal);
        assert!("heavy".parse::<BmiCategory>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: scaling height by k and weight by k² leaves BMI unchanged
        #[test]
        fn prop_bmi_invariant_under_scaling(
            weight in 30.0f64..300.0,
            height in 100.0f64..250.0,
            k in 0.5f64..2.0
        ) {
            let base = calculate_bmi(weight, height);
            let scaled = calculate_bmi(weight * k * k, height * k);
            prop_assert!((base - scaled).abs() < 1e-9 * base.max(1.0),
                "BMI {} changed to {} under scale {}", base, scaled, k);
        }

        /// Property: every BMI value falls in exactly one category range
        #[test]
        fn prop_categories_partition(bmi in 5.0f64..80.0) {
            let containing: Vec<_> = BmiCategory::ALL
                .iter()
                .filter(|c| {
                    let (min, max) = c.range();
                    bmi >= min && bmi < max
                })
                .collect();
            prop_assert_eq!(containing.len(), 1);
            prop_assert_eq!(*containing[0], classify_bmi(bmi));
        }

        /// Property: stored BMI has at most one decimal place
        #[test]
        fn prop_bmi_rounded_to_tenth(weight in 30.0f64..300.0, height in 100.0f64..250.0) {
            let result = calculate_bmi_result(height, weight);
            let tenths = result.bmi * 10.0;
            prop_assert!((tenths - tenths.round()).abs() < 1e-6);
        }
    }

    // =========================================================================
    // BMR Tests
    // =========================================================================

    #[test]
    fn test_bmr_male_reference_value() {
        let bmr = calculate_bmr(Gender::Male, 75.0, 180.0, 25).unwrap();
        let expected = 88.362 + 13.397 * 75.0 + 4.799 * 180.0 - 5.677 * 25.0;
        assert!((bmr - expected).abs() < 1e-9);
        assert!((bmr - 1815.032).abs() < 1e-6);
    }

    #[test]
    fn test_bmr_female_reference_value() {
        // 28yo female, 60kg, 165cm
        let bmr = calculate_bmr(Gender::Female, 60.0, 165.0, 28).unwrap();
        assert!((bmr - 1392.343).abs() < 1e-6);
    }

    #[test]
    fn test_bmr_other_gender_is_reported() {
        let result = calculate_bmr(Gender::Other, 70.0, 170.0, 30);
        assert_eq!(result, Err(PlanError::UnsupportedGender("other".to_string())));
    }

    #[test]
    fn test_gender_round_trips_through_str() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(gender.as_str().parse::<Gender>().unwrap(), gender);
        }
        assert!("unknown".parse::<Gender>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMR is positive across the accepted profile ranges
        #[test]
        fn prop_bmr_positive(
            weight in 30.0f64..300.0,
            height in 100.0f64..250.0,
            age in 13i32..=100
        ) {
            prop_assert!(calculate_bmr(Gender::Male, weight, height, age).unwrap() > 0.0);
            prop_assert!(calculate_bmr(Gender::Female, weight, height, age).unwrap() > 0.0);
        }

        /// Property: BMR decreases with age, all else equal
        #[test]
        fn prop_bmr_decreases_with_age(
            weight in 40.0f64..150.0,
            height in 140.0f64..210.0,
            age in 13i32..99
        ) {
            let younger = calculate_bmr(Gender::Female, weight, height, age).unwrap();
            let older = calculate_bmr(Gender::Female, weight, height, age + 1).unwrap();
            prop_assert!(older < younger);
        }
    }
}
