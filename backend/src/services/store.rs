//! Storage seams used by plan generation
//!
//! Generation only needs to read a profile and find/insert/update the
//! owner's active plan. Expressing that as traits lets the orchestration be
//! exercised against an in-memory store as well as Postgres.

use crate::repositories::{
    DietPlanRecord, DietPlanRepository, UserRecord, UserRepository, WorkoutPlanRecord,
    WorkoutPlanRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use gym_shared::diet::DietPlanDraft;
use gym_shared::workout::WorkoutPlanDraft;
use gym_shared::{FitnessGoal, Gender, UserProfile};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Read access to the body metrics plan generation depends on
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>>;
}

/// Persistence for generated plans
///
/// `update_*` returns `None` when the plan no longer exists.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn find_active_diet_plan(&self, owner: Uuid) -> Result<Option<DietPlanRecord>>;
    async fn insert_diet_plan(
        &self,
        owner: Uuid,
        draft: &DietPlanDraft,
        actor: Uuid,
    ) -> Result<DietPlanRecord>;
    async fn update_diet_plan(
        &self,
        id: Uuid,
        draft: &DietPlanDraft,
        actor: Uuid,
    ) -> Result<Option<DietPlanRecord>>;

    async fn find_active_workout_plan(&self, owner: Uuid) -> Result<Option<WorkoutPlanRecord>>;
    async fn insert_workout_plan(
        &self,
        owner: Uuid,
        draft: &WorkoutPlanDraft,
        actor: Uuid,
    ) -> Result<WorkoutPlanRecord>;
    async fn update_workout_plan(
        &self,
        id: Uuid,
        draft: &WorkoutPlanDraft,
        actor: Uuid,
    ) -> Result<Option<WorkoutPlanRecord>>;
}

pub(crate) fn decimal_to_f64(d: &Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Project an account row onto the fields plan generation reads
pub(crate) fn profile_from_record(user: &UserRecord) -> Result<UserProfile> {
    let gender: Gender = user
        .gender
        .parse()
        .map_err(|e: String| anyhow::anyhow!("User {} has invalid gender: {}", user.id, e))?;
    Ok(UserProfile {
        gender,
        age: user.age,
        height_cm: decimal_to_f64(&user.height_cm),
        weight_kg: decimal_to_f64(&user.weight_kg),
        fitness_goal: FitnessGoal::from(user.fitness_goal.as_str()),
    })
}

#[async_trait]
impl ProfileStore for PgPool {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        UserRepository::find_by_id(self, user_id)
            .await?
            .map(|user| profile_from_record(&user))
            .transpose()
    }
}

#[async_trait]
impl PlanStore for PgPool {
    async fn find_active_diet_plan(&self, owner: Uuid) -> Result<Option<DietPlanRecord>> {
        DietPlanRepository::find_active(self, owner).await
    }

    async fn insert_diet_plan(
        &self,
        owner: Uuid,
        draft: &DietPlanDraft,
        actor: Uuid,
    ) -> Result<DietPlanRecord> {
        DietPlanRepository::insert_active(self, owner, draft, actor).await
    }

    async fn update_diet_plan(
        &self,
        id: Uuid,
        draft: &DietPlanDraft,
        actor: Uuid,
    ) -> Result<Option<DietPlanRecord>> {
        DietPlanRepository::replace_generated(self, id, draft, actor).await
    }

    async fn find_active_workout_plan(&self, owner: Uuid) -> Result<Option<WorkoutPlanRecord>> {
        WorkoutPlanRepository::find_active(self, owner).await
    }

    async fn insert_workout_plan(
        &self,
        owner: Uuid,
        draft: &WorkoutPlanDraft,
        actor: Uuid,
    ) -> Result<WorkoutPlanRecord> {
        WorkoutPlanRepository::insert_active(self, owner, draft, actor).await
    }

    async fn update_workout_plan(
        &self,
        id: Uuid,
        draft: &WorkoutPlanDraft,
        actor: Uuid,
    ) -> Result<Option<WorkoutPlanRecord>> {
        WorkoutPlanRepository::replace_generated(self, id, draft, actor).await
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory store with the same single-active-plan behaviour as the
    //! partial unique indexes

    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryStore {
        pub profiles: Mutex<HashMap<Uuid, UserProfile>>,
        pub diet_plans: Mutex<Vec<DietPlanRecord>>,
        pub workout_plans: Mutex<Vec<WorkoutPlanRecord>>,
    }

    impl MemoryStore {
        pub fn with_profile(user_id: Uuid, profile: UserProfile) -> Self {
            let store = Self::default();
            store.profiles.lock().unwrap().insert(user_id, profile);
            store
        }
    }

    fn apply_diet(plan: &mut DietPlanRecord, draft: &DietPlanDraft, actor: Uuid) {
        plan.fitness_goal = draft.fitness_goal.to_string();
        plan.bmi_category = draft.bmi_category.to_string();
        plan.total_calories = draft.total_calories;
        plan.total_protein = draft.total_protein;
        plan.total_carbs = draft.total_carbs;
        plan.total_fats = draft.total_fats;
        plan.breakfast = Json(draft.breakfast.clone());
        plan.lunch = Json(draft.lunch.clone());
        plan.dinner = Json(draft.dinner.clone());
        plan.snacks = Json(draft.snacks.clone());
        plan.generated_by = Some(actor);
        plan.updated_at = Utc::now();
    }

    fn apply_workout(plan: &mut WorkoutPlanRecord, draft: &WorkoutPlanDraft, actor: Uuid) {
        plan.fitness_goal = draft.fitness_goal.to_string();
        plan.difficulty = draft.difficulty.to_string();
        plan.duration_minutes = draft.duration_minutes;
        plan.exercises = Json(draft.exercises.clone());
        plan.generated_by = Some(actor);
        plan.updated_at = Utc::now();
    }

    #[async_trait]
    impl ProfileStore for MemoryStore {
        async fn find_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
            Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
        }
    }

    #[async_trait]
    impl PlanStore for MemoryStore {
        async fn find_active_diet_plan(&self, owner: Uuid) -> Result<Option<DietPlanRecord>> {
            let plans = self.diet_plans.lock().unwrap();
            Ok(plans.iter().find(|p| p.user_id == owner && p.is_active).cloned())
        }

        async fn insert_diet_plan(
            &self,
            owner: Uuid,
            draft: &DietPlanDraft,
            actor: Uuid,
        ) -> Result<DietPlanRecord> {
            let mut plans = self.diet_plans.lock().unwrap();
            if let Some(existing) = plans.iter_mut().find(|p| p.user_id == owner && p.is_active) {
                apply_diet(existing, draft, actor);
                return Ok(existing.clone());
            }
            let now = Utc::now();
            let mut plan = DietPlanRecord {
                id: Uuid::new_v4(),
                user_id: owner,
                name: "Personalized Diet Plan".to_string(),
                fitness_goal: String::new(),
                bmi_category: String::new(),
                total_calories: 0,
                total_protein: 0,
                total_carbs: 0,
                total_fats: 0,
                breakfast: Json(draft.breakfast.clone()),
                lunch: Json(draft.lunch.clone()),
                dinner: Json(draft.dinner.clone()),
                snacks: Json(Vec::new()),
                is_active: true,
                generated_by: None,
                created_at: now,
                updated_at: now,
            };
            apply_diet(&mut plan, draft, actor);
            plans.push(plan.clone());
            Ok(plan)
        }

        async fn update_diet_plan(
            &self,
            id: Uuid,
            draft: &DietPlanDraft,
            actor: Uuid,
        ) -> Result<Option<DietPlanRecord>> {
            let mut plans = self.diet_plans.lock().unwrap();
            Ok(plans.iter_mut().find(|p| p.id == id).map(|plan| {
                apply_diet(plan, draft, actor);
                plan.clone()
            }))
        }

        async fn find_active_workout_plan(
            &self,
            owner: Uuid,
        ) -> Result<Option<WorkoutPlanRecord>> {
            let plans = self.workout_plans.lock().unwrap();
            Ok(plans.iter().find(|p| p.user_id == owner && p.is_active).cloned())
        }

        async fn insert_workout_plan(
            &self,
            owner: Uuid,
            draft: &WorkoutPlanDraft,
            actor: Uuid,
        ) -> Result<WorkoutPlanRecord> {
            let mut plans = self.workout_plans.lock().unwrap();
            if let Some(existing) = plans.iter_mut().find(|p| p.user_id == owner && p.is_active) {
                apply_workout(existing, draft, actor);
                return Ok(existing.clone());
            }
            let now = Utc::now();
            let mut plan = WorkoutPlanRecord {
                id: Uuid::new_v4(),
                user_id: owner,
                name: "Personalized Workout Plan".to_string(),
                fitness_goal: String::new(),
                difficulty: String::new(),
                duration_minutes: 0,
                exercises: Json(Vec::new()),
                is_active: true,
                generated_by: None,
                created_at: now,
                updated_at: now,
            };
            apply_workout(&mut plan, draft, actor);
            plans.push(plan.clone());
            Ok(plan)
        }

        async fn update_workout_plan(
            &self,
            id: Uuid,
            draft: &WorkoutPlanDraft,
            actor: Uuid,
        ) -> Result<Option<WorkoutPlanRecord>> {
            let mut plans = self.workout_plans.lock().unwrap();
            Ok(plans.iter_mut().find(|p| p.id == id).map(|plan| {
                apply_workout(plan, draft, actor);
                plan.clone()
            }))
        }
    }
}
