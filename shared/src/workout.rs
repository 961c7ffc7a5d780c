//! Exercise catalog, session duration estimate and difficulty selection

use crate::goals::FitnessGoal;
use crate::health_metrics::UserProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Warm-up added to every session (seconds)
pub const WARM_UP_SECONDS: i32 = 300;
/// Cool-down added to every session (seconds)
pub const COOL_DOWN_SECONDS: i32 = 180;
/// Estimated time per repetition for rep-based exercises (seconds)
pub const SECONDS_PER_REP: i32 = 2;
/// Rest allowance per set for rep-based exercises (seconds)
pub const REST_PER_SET_SECONDS: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
    FullBody,
    Cardio,
}

/// Difficulty tier of an exercise or a whole plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!("Unknown difficulty: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Bodyweight,
    Dumbbells,
    Barbell,
    Machine,
    Cardio,
}

/// A single exercise as stored on a workout plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub description: String,
    pub sets: i32,
    pub reps: i32,
    /// Seconds per set; zero means the set is estimated from its reps
    pub duration_seconds: i32,
    pub demo_reference: String,
    pub muscle_group: MuscleGroup,
    pub difficulty: Difficulty,
    pub equipment: Equipment,
}

impl Exercise {
    /// Estimated time for all sets of this exercise (seconds)
    pub fn estimated_seconds(&self) -> i32 {
        if self.duration_seconds > 0 {
            self.duration_seconds * self.sets
        } else {
            (self.reps * SECONDS_PER_REP + REST_PER_SET_SECONDS) * self.sets
        }
    }
}

struct ExerciseTemplate {
    name: &'static str,
    description: &'static str,
    sets: i32,
    reps: i32,
    duration_seconds: i32,
    demo_reference: &'static str,
    muscle_group: MuscleGroup,
    difficulty: Difficulty,
    equipment: Equipment,
}

impl ExerciseTemplate {
    fn to_exercise(&self) -> Exercise {
        Exercise {
            name: self.name.to_string(),
            description: self.description.to_string(),
            sets: self.sets,
            reps: self.reps,
            duration_seconds: self.duration_seconds,
            demo_reference: self.demo_reference.to_string(),
            muscle_group: self.muscle_group,
            difficulty: self.difficulty,
            equipment: self.equipment,
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

const DEMO_JUMPING_JACKS: &str = "https://www.youtube.com/embed/iSSAk4XCsRA";
const DEMO_PLANK: &str = "https://www.youtube.com/embed/ASdvN_XEl_c";
const DEMO_PUSH_UPS: &str = "https://www.youtube.com/embed/IODxDxX7oi4";
const DEMO_SQUATS: &str = "https://www.youtube.com/embed/YaXPRqUwItQ";
const DEMO_PLACEHOLDER: &str = "https://www.youtube.com/embed/example";

const WEIGHT_LOSS_EXERCISES: &[ExerciseTemplate] = &[
    ExerciseTemplate {
        name: "Jumping Jacks",
        description: "Full body cardio exercise to burn calories",
        sets: 3,
        reps: 20,
        duration_seconds: 30,
        demo_reference: DEMO_JUMPING_JACKS,
        muscle_group: MuscleGroup::FullBody,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Burpees",
        description: "High-intensity exercise combining squat, push-up, and jump",
        sets: 3,
        reps: 10,
        duration_seconds: 45,
        demo_reference: "https://www.youtube.com/embed/dZgVxmf6jkA",
        muscle_group: MuscleGroup::FullBody,
        difficulty: Difficulty::Intermediate,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Mountain Climbers",
        description: "Dynamic core exercise that also works shoulders and legs",
        sets: 3,
        reps: 15,
        duration_seconds: 30,
        demo_reference: "https://www.youtube.com/embed/nmwgirgXLYM",
        muscle_group: MuscleGroup::Core,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "High Knees",
        description: "Cardio exercise that targets legs and core",
        sets: 3,
        reps: 20,
        duration_seconds: 30,
        demo_reference: "https://www.youtube.com/embed/oAPCPjnU1wA",
        muscle_group: MuscleGroup::Cardio,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Plank",
        description: "Core strengthening exercise",
        sets: 3,
        reps: 1,
        duration_seconds: 60,
        demo_reference: DEMO_PLANK,
        muscle_group: MuscleGroup::Core,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
];

const MUSCLE_GAIN_EXERCISES: &[ExerciseTemplate] = &[
    ExerciseTemplate {
        name: "Push-ups",
        description: "Upper body strength exercise targeting chest, shoulders, and triceps",
        sets: 4,
        reps: 15,
        duration_seconds: 0,
        demo_reference: DEMO_PUSH_UPS,
        muscle_group: MuscleGroup::Chest,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Squats",
        description: "Lower body compound exercise for legs and glutes",
        sets: 4,
        reps: 20,
        duration_seconds: 0,
        demo_reference: DEMO_SQUATS,
        muscle_group: MuscleGroup::Legs,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Pull-ups",
        description: "Upper body pulling exercise for back and biceps",
        sets: 3,
        reps: 8,
        duration_seconds: 0,
        demo_reference: "https://www.youtube.com/embed/eGo4IYlbE5g",
        muscle_group: MuscleGroup::Back,
        difficulty: Difficulty::Intermediate,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Dips",
        description: "Tricep and chest exercise using parallel bars",
        sets: 3,
        reps: 12,
        duration_seconds: 0,
        demo_reference: "https://www.youtube.com/embed/2z8JmcrW-As",
        muscle_group: MuscleGroup::Arms,
        difficulty: Difficulty::Intermediate,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Lunges",
        description: "Unilateral leg exercise for balance and strength",
        sets: 3,
        reps: 15,
        duration_seconds: 0,
        demo_reference: "https://www.youtube.com/embed/3XDriUn0udo",
        muscle_group: MuscleGroup::Legs,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
];

const FITNESS_EXERCISES: &[ExerciseTemplate] = &[
    ExerciseTemplate {
        name: "Push-ups",
        description: "Upper body strength exercise",
        sets: 3,
        reps: 12,
        duration_seconds: 0,
        demo_reference: DEMO_PUSH_UPS,
        muscle_group: MuscleGroup::Chest,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Squats",
        description: "Lower body strength exercise",
        sets: 3,
        reps: 15,
        duration_seconds: 0,
        demo_reference: DEMO_SQUATS,
        muscle_group: MuscleGroup::Legs,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Plank",
        description: "Core stability exercise",
        sets: 3,
        reps: 1,
        duration_seconds: 45,
        demo_reference: DEMO_PLANK,
        muscle_group: MuscleGroup::Core,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Jumping Jacks",
        description: "Cardio exercise for overall fitness",
        sets: 3,
        reps: 15,
        duration_seconds: 30,
        demo_reference: DEMO_JUMPING_JACKS,
        muscle_group: MuscleGroup::Cardio,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Superman",
        description: "Back strengthening exercise",
        sets: 3,
        reps: 12,
        duration_seconds: 0,
        demo_reference: "https://www.youtube.com/embed/0nXmWqj7eVE",
        muscle_group: MuscleGroup::Back,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
];

const MAINTENANCE_EXERCISES: &[ExerciseTemplate] = &[
    ExerciseTemplate {
        name: "Walking",
        description: "Low-impact cardio exercise",
        sets: 1,
        reps: 1,
        duration_seconds: 1800,
        demo_reference: DEMO_PLACEHOLDER,
        muscle_group: MuscleGroup::Cardio,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Gentle Stretching",
        description: "Flexibility and mobility exercises",
        sets: 1,
        reps: 1,
        duration_seconds: 600,
        demo_reference: DEMO_PLACEHOLDER,
        muscle_group: MuscleGroup::FullBody,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
    ExerciseTemplate {
        name: "Light Yoga",
        description: "Mind-body exercise for flexibility and strength",
        sets: 1,
        reps: 1,
        duration_seconds: 900,
        demo_reference: DEMO_PLACEHOLDER,
        muscle_group: MuscleGroup::FullBody,
        difficulty: Difficulty::Beginner,
        equipment: Equipment::Bodyweight,
    },
];

fn catalog_for(goal: &FitnessGoal) -> &'static [ExerciseTemplate] {
    match goal {
        FitnessGoal::WeightLoss => WEIGHT_LOSS_EXERCISES,
        FitnessGoal::MuscleGain => MUSCLE_GAIN_EXERCISES,
        FitnessGoal::Maintenance => MAINTENANCE_EXERCISES,
        FitnessGoal::Fitness | FitnessGoal::Unrecognized(_) => FITNESS_EXERCISES,
    }
}

/// Ordered exercise list for a goal; unrecognized goals get the fitness list
pub fn exercises_for_goal(goal: &FitnessGoal) -> Vec<Exercise> {
    catalog_for(goal)
        .iter()
        .map(ExerciseTemplate::to_exercise)
        .collect()
}

// ============================================================================
// Duration & Difficulty
// ============================================================================

/// Estimate session length in whole minutes, rounding half up
///
/// Includes the fixed warm-up and cool-down.
pub fn calculate_workout_duration(exercises: &[Exercise]) -> i32 {
    let total: i32 = exercises.iter().map(Exercise::estimated_seconds).sum::<i32>()
        + WARM_UP_SECONDS
        + COOL_DOWN_SECONDS;
    (total + 30).div_euclid(60)
}

/// Pick the plan difficulty for a user's age and goal
///
/// Only under-25s get intermediate plans, and never for maintenance.
pub fn determine_difficulty(age: i32, goal: &FitnessGoal) -> Difficulty {
    if age < 25 && *goal != FitnessGoal::Maintenance {
        Difficulty::Intermediate
    } else {
        Difficulty::Beginner
    }
}

// ============================================================================
// Plan Assembly
// ============================================================================

/// A generated workout plan before it is attached to an owner and stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlanDraft {
    pub fitness_goal: FitnessGoal,
    pub difficulty: Difficulty,
    pub duration_minutes: i32,
    pub exercises: Vec<Exercise>,
}

/// Generate the workout session for a profile
///
/// Workout generation does not depend on gender or body metrics, so it is
/// total for every validated profile.
pub fn generate_workout_plan(profile: &UserProfile) -> WorkoutPlanDraft {
    let exercises = exercises_for_goal(&profile.fitness_goal);
    WorkoutPlanDraft {
        fitness_goal: profile.fitness_goal.clone(),
        difficulty: determine_difficulty(profile.age, &profile.fitness_goal),
        duration_minutes: calculate_workout_duration(&exercises),
        exercises,
    }
}
