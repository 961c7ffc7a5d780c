//! Workout plan service

use crate::error::ApiError;
use crate::repositories::{WorkoutPlanRecord, WorkoutPlanRepository};
use crate::services::store::{PlanStore, ProfileStore};
use gym_shared::workout::{generate_workout_plan, Difficulty, WorkoutPlanDraft};
use gym_shared::types::WorkoutPlanResponse;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Convert a stored plan into its public representation
pub(crate) fn workout_response(plan: WorkoutPlanRecord) -> Result<WorkoutPlanResponse, ApiError> {
    let difficulty: Difficulty = plan
        .difficulty
        .parse()
        .map_err(|e: String| ApiError::Internal(anyhow::anyhow!(e)))?;

    Ok(WorkoutPlanResponse {
        id: plan.id.to_string(),
        user_id: plan.user_id.to_string(),
        name: plan.name,
        fitness_goal: plan.fitness_goal.into(),
        difficulty,
        duration_minutes: plan.duration_minutes,
        exercises: plan.exercises.0,
        is_active: plan.is_active,
        generated_by: plan.generated_by.map(|id| id.to_string()),
        created_at: plan.created_at,
        updated_at: plan.updated_at,
    })
}

async fn upsert<S>(
    store: &S,
    owner: Uuid,
    draft: &WorkoutPlanDraft,
    actor: Uuid,
) -> anyhow::Result<WorkoutPlanRecord>
where
    S: PlanStore + ?Sized,
{
    if let Some(existing) = store.find_active_workout_plan(owner).await? {
        if let Some(updated) = store.update_workout_plan(existing.id, draft, actor).await? {
            return Ok(updated);
        }
    }
    store.insert_workout_plan(owner, draft, actor).await
}

pub struct WorkoutService;

impl WorkoutService {
    /// Generate (or regenerate) the active workout plan for `user_id`
    pub async fn generate<S>(
        store: &S,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<WorkoutPlanResponse, ApiError>
    where
        S: ProfileStore + PlanStore + ?Sized,
    {
        let profile = store
            .find_profile(user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let draft = generate_workout_plan(&profile);
        let plan = upsert(store, user_id, &draft, actor_id)
            .await
            .map_err(ApiError::Internal)?;

        metrics::counter!("gym_plans_generated_total", "kind" => "workout").increment(1);
        info!(
            user_id = %user_id,
            plan_id = %plan.id,
            goal = %draft.fitness_goal,
            difficulty = %draft.difficulty,
            minutes = draft.duration_minutes,
            "Generated workout plan"
        );

        workout_response(plan)
    }

    /// The caller's active workout plan
    pub async fn get_active(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<WorkoutPlanResponse, ApiError> {
        let plan = WorkoutPlanRepository::find_active(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("No active workout plan".to_string()))?;
        workout_response(plan)
    }
}
