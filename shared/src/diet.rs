//! Meal catalog and diet plan assembly
//!
//! Each meal slot has one fixed template per fitness goal. Templates carry
//! their own macro split which is applied to the slot's share of the daily
//! calorie target. Goals without a template use the maintenance entries.

use crate::errors::PlanError;
use crate::goals::{FitnessGoal, GoalPolicy, MacroGrams};
use crate::health_metrics::{calculate_bmi_result, calculate_bmr, BmiCategory, UserProfile};
use serde::{Deserialize, Serialize};

/// Share of the daily calorie target allotted to each slot
pub const BREAKFAST_SHARE: f64 = 0.25;
pub const LUNCH_SHARE: f64 = 0.35;
pub const DINNER_SHARE: f64 = 0.30;
pub const SNACK_SHARE: f64 = 0.10;

/// A single meal as stored on a diet plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

/// Fraction of a meal's calories taken from each macronutrient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Static meal definition, scaled to a calorie allocation on use
#[derive(Debug, Clone, Copy)]
pub struct MealTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub split: MacroSplit,
    /// Fraction of the slot allocation this meal actually uses
    pub portion: f64,
    pub ingredients: &'static [&'static str],
    pub instructions: &'static str,
}

impl MealTemplate {
    /// Build the meal for a slot allocation of `calories`
    pub fn scale(&self, calories: f64) -> Meal {
        let calories = calories * self.portion;
        let macros = MacroGrams::from_calories(
            calories,
            self.split.protein,
            self.split.carbs,
            self.split.fats,
        );
        Meal {
            name: self.name.to_string(),
            description: self.description.to_string(),
            calories: calories.round() as i32,
            protein: macros.protein,
            carbs: macros.carbs,
            fats: macros.fats,
            ingredients: self.ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: self.instructions.to_string(),
        }
    }
}

const fn split(protein: f64, carbs: f64, fats: f64) -> MacroSplit {
    MacroSplit {
        protein,
        carbs,
        fats,
    }
}

// ============================================================================
// Catalog
// ============================================================================

const BREAKFAST_WEIGHT_LOSS: MealTemplate = MealTemplate {
    name: "Protein-Rich Breakfast Bowl",
    description: "A nutritious breakfast to kickstart your metabolism",
    split: split(0.4, 0.3, 0.3),
    portion: 1.0,
    ingredients: &["Greek yogurt", "Berries", "Nuts", "Honey"],
    instructions: "Mix Greek yogurt with berries, top with nuts and drizzle honey.",
};

const BREAKFAST_MUSCLE_GAIN: MealTemplate = MealTemplate {
    name: "Power Protein Breakfast",
    description: "High-protein breakfast for muscle building",
    split: split(0.35, 0.45, 0.2),
    portion: 1.0,
    ingredients: &["Eggs", "Oatmeal", "Banana", "Peanut butter"],
    instructions: "Scramble eggs, cook oatmeal, add banana and peanut butter.",
};

const BREAKFAST_FITNESS: MealTemplate = MealTemplate {
    name: "Balanced Fitness Breakfast",
    description: "Well-rounded breakfast for overall fitness",
    split: split(0.25, 0.55, 0.2),
    portion: 1.0,
    ingredients: &["Whole grain bread", "Avocado", "Eggs", "Spinach"],
    instructions: "Toast bread, spread avocado, add poached eggs and spinach.",
};

const BREAKFAST_MAINTENANCE: MealTemplate = MealTemplate {
    name: "Healthy Maintenance Breakfast",
    description: "Sustaining breakfast for weight maintenance",
    split: split(0.2, 0.6, 0.2),
    portion: 1.0,
    ingredients: &["Cereal", "Milk", "Fruits", "Nuts"],
    instructions: "Mix cereal with milk, add fresh fruits and nuts.",
};

const LUNCH_WEIGHT_LOSS: MealTemplate = MealTemplate {
    name: "Lean Protein Salad",
    description: "Light and nutritious lunch for weight loss",
    split: split(0.4, 0.25, 0.35),
    portion: 1.0,
    ingredients: &["Grilled chicken", "Mixed greens", "Vegetables", "Olive oil"],
    instructions: "Grill chicken, mix with greens and vegetables, drizzle with olive oil.",
};

const LUNCH_MUSCLE_GAIN: MealTemplate = MealTemplate {
    name: "Muscle Building Bowl",
    description: "Protein and carb-rich lunch for muscle growth",
    split: split(0.3, 0.5, 0.2),
    portion: 1.0,
    ingredients: &["Brown rice", "Salmon", "Broccoli", "Sweet potato"],
    instructions: "Cook brown rice, grill salmon, steam broccoli and sweet potato.",
};

const LUNCH_FITNESS: MealTemplate = MealTemplate {
    name: "Fitness Fuel Lunch",
    description: "Balanced lunch for active lifestyle",
    split: split(0.25, 0.55, 0.2),
    portion: 1.0,
    ingredients: &["Quinoa", "Tuna", "Mixed vegetables", "Olive oil"],
    instructions: "Cook quinoa, mix with tuna and vegetables, drizzle with olive oil.",
};

const LUNCH_MAINTENANCE: MealTemplate = MealTemplate {
    name: "Maintenance Lunch",
    description: "Satisfying lunch for weight maintenance",
    split: split(0.2, 0.6, 0.2),
    portion: 1.0,
    ingredients: &["Pasta", "Lean meat", "Tomato sauce", "Vegetables"],
    instructions: "Cook pasta, add lean meat and tomato sauce, serve with vegetables.",
};

const DINNER_WEIGHT_LOSS: MealTemplate = MealTemplate {
    name: "Light Protein Dinner",
    description: "Light dinner to support weight loss",
    split: split(0.45, 0.2, 0.35),
    portion: 1.0,
    ingredients: &["Fish", "Asparagus", "Cauliflower rice", "Lemon"],
    instructions: "Grill fish, steam asparagus, prepare cauliflower rice, squeeze lemon.",
};

const DINNER_MUSCLE_GAIN: MealTemplate = MealTemplate {
    name: "Recovery Dinner",
    description: "Nutrient-rich dinner for muscle recovery",
    split: split(0.3, 0.45, 0.25),
    portion: 1.0,
    ingredients: &["Lean beef", "Potatoes", "Green beans", "Herbs"],
    instructions: "Grill lean beef, bake potatoes, steam green beans, add herbs.",
};

const DINNER_FITNESS: MealTemplate = MealTemplate {
    name: "Fitness Dinner",
    description: "Balanced dinner for fitness enthusiasts",
    split: split(0.25, 0.5, 0.25),
    portion: 1.0,
    ingredients: &["Chicken breast", "Wild rice", "Mixed vegetables", "Herbs"],
    instructions: "Grill chicken breast, cook wild rice, steam vegetables, add herbs.",
};

const DINNER_MAINTENANCE: MealTemplate = MealTemplate {
    name: "Comfort Dinner",
    description: "Satisfying dinner for maintenance",
    split: split(0.2, 0.55, 0.25),
    portion: 1.0,
    ingredients: &["Pork tenderloin", "Mashed potatoes", "Carrots", "Gravy"],
    instructions: "Roast pork tenderloin, prepare mashed potatoes, cook carrots, make gravy.",
};

const SNACKS_WEIGHT_LOSS: &[MealTemplate] = &[MealTemplate {
    name: "Protein Smoothie",
    description: "Low-calorie protein boost",
    split: split(0.5, 0.3, 0.2),
    portion: 0.5,
    ingredients: &["Protein powder", "Almond milk", "Berries"],
    instructions: "Blend protein powder with almond milk and berries.",
}];

const SNACKS_MUSCLE_GAIN: &[MealTemplate] = &[MealTemplate {
    name: "Protein Bar",
    description: "High-protein snack for muscle building",
    split: split(0.4, 0.4, 0.2),
    portion: 0.6,
    ingredients: &["Protein bar", "Nuts", "Dried fruits"],
    instructions: "Eat protein bar with nuts and dried fruits.",
}];

const SNACKS_FITNESS: &[MealTemplate] = &[MealTemplate {
    name: "Energy Balls",
    description: "Natural energy boost",
    split: split(0.2, 0.6, 0.2),
    portion: 0.5,
    ingredients: &["Dates", "Nuts", "Oats", "Honey"],
    instructions: "Blend dates, nuts, oats, and honey, roll into balls.",
}];

const SNACKS_MAINTENANCE: &[MealTemplate] = &[MealTemplate {
    name: "Mixed Nuts",
    description: "Healthy snack for maintenance",
    split: split(0.15, 0.25, 0.6),
    portion: 0.5,
    ingredients: &["Almonds", "Walnuts", "Cashews"],
    instructions: "Mix almonds, walnuts, and cashews.",
}];

/// Breakfast template for a goal
pub fn breakfast_template(goal: &FitnessGoal) -> &'static MealTemplate {
    match goal {
        FitnessGoal::WeightLoss => &BREAKFAST_WEIGHT_LOSS,
        FitnessGoal::MuscleGain => &BREAKFAST_MUSCLE_GAIN,
        FitnessGoal::Fitness => &BREAKFAST_FITNESS,
        FitnessGoal::Maintenance | FitnessGoal::Unrecognized(_) => &BREAKFAST_MAINTENANCE,
    }
}

/// Lunch template for a goal
pub fn lunch_template(goal: &FitnessGoal) -> &'static MealTemplate {
    match goal {
        FitnessGoal::WeightLoss => &LUNCH_WEIGHT_LOSS,
        FitnessGoal::MuscleGain => &LUNCH_MUSCLE_GAIN,
        FitnessGoal::Fitness => &LUNCH_FITNESS,
        FitnessGoal::Maintenance | FitnessGoal::Unrecognized(_) => &LUNCH_MAINTENANCE,
    }
}

/// Dinner template for a goal
pub fn dinner_template(goal: &FitnessGoal) -> &'static MealTemplate {
    match goal {
        FitnessGoal::WeightLoss => &DINNER_WEIGHT_LOSS,
        FitnessGoal::MuscleGain => &DINNER_MUSCLE_GAIN,
        FitnessGoal::Fitness => &DINNER_FITNESS,
        FitnessGoal::Maintenance | FitnessGoal::Unrecognized(_) => &DINNER_MAINTENANCE,
    }
}

/// Snack templates for a goal
pub fn snack_templates(goal: &FitnessGoal) -> &'static [MealTemplate] {
    match goal {
        FitnessGoal::WeightLoss => SNACKS_WEIGHT_LOSS,
        FitnessGoal::MuscleGain => SNACKS_MUSCLE_GAIN,
        FitnessGoal::Fitness => SNACKS_FITNESS,
        FitnessGoal::Maintenance | FitnessGoal::Unrecognized(_) => SNACKS_MAINTENANCE,
    }
}

// ============================================================================
// Plan Assembly
// ============================================================================

/// A generated diet plan before it is attached to an owner and stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlanDraft {
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
}

/// Generate the day's diet for a profile
///
/// Fails only when BMR is undefined for the profile's gender.
pub fn generate_diet_plan(profile: &UserProfile) -> Result<DietPlanDraft, PlanError> {
    let bmr = calculate_bmr(
        profile.gender,
        profile.weight_kg,
        profile.height_cm,
        profile.age,
    )?;
    let bmi = calculate_bmi_result(profile.height_cm, profile.weight_kg);

    let goal = &profile.fitness_goal;
    let policy = GoalPolicy::for_goal(goal);
    let daily_calories = policy.daily_calories(bmr);
    let totals = policy.daily_macros(daily_calories);

    Ok(DietPlanDraft {
        fitness_goal: goal.clone(),
        bmi_category: bmi.category,
        total_calories: daily_calories.round() as i32,
        total_protein: totals.protein,
        total_carbs: totals.carbs,
        total_fats: totals.fats,
        breakfast: breakfast_template(goal).scale(daily_calories * BREAKFAST_SHARE),
        lunch: lunch_template(goal).scale(daily_calories * LUNCH_SHARE),
        dinner: dinner_template(goal).scale(daily_calories * DINNER_SHARE),
        snacks: snack_templates(goal)
            .iter()
            .map(|t| t.scale(daily_calories * SNACK_SHARE))
            .collect(),
    })
}
