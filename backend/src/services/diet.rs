//! Diet plan service
//!
//! Generation reads the owner's profile, builds a draft from the meal
//! catalog and upserts it as the owner's single active plan.

use crate::error::ApiError;
use crate::repositories::{DietPlanRecord, DietPlanRepository};
use crate::services::store::{PlanStore, ProfileStore};
use gym_shared::diet::{generate_diet_plan, DietPlanDraft};
use gym_shared::types::DietPlanResponse;
use gym_shared::BmiCategory;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Convert a stored plan into its public representation
pub(crate) fn diet_response(plan: DietPlanRecord) -> Result<DietPlanResponse, ApiError> {
    let bmi_category: BmiCategory = plan
        .bmi_category
        .parse()
        .map_err(|e: String| ApiError::Internal(anyhow::anyhow!(e)))?;

    Ok(DietPlanResponse {
        id: plan.id.to_string(),
        user_id: plan.user_id.to_string(),
        name: plan.name,
        fitness_goal: plan.fitness_goal.into(),
        bmi_category,
        total_calories: plan.total_calories,
        total_protein: plan.total_protein,
        total_carbs: plan.total_carbs,
        total_fats: plan.total_fats,
        breakfast: plan.breakfast.0,
        lunch: plan.lunch.0,
        dinner: plan.dinner.0,
        snacks: plan.snacks.0,
        is_active: plan.is_active,
        generated_by: plan.generated_by.map(|id| id.to_string()),
        created_at: plan.created_at,
        updated_at: plan.updated_at,
    })
}

/// Overwrite the owner's active plan, or create it when there is none
async fn upsert<S>(
    store: &S,
    owner: Uuid,
    draft: &DietPlanDraft,
    actor: Uuid,
) -> anyhow::Result<DietPlanRecord>
where
    S: PlanStore + ?Sized,
{
    if let Some(existing) = store.find_active_diet_plan(owner).await? {
        // The row may have been deleted since the lookup
        if let Some(updated) = store.update_diet_plan(existing.id, draft, actor).await? {
            return Ok(updated);
        }
    }
    store.insert_diet_plan(owner, draft, actor).await
}

pub struct DietService;

impl DietService {
    /// Generate (or regenerate) the active diet plan for `user_id`
    ///
    /// `actor_id` is recorded as the account that triggered generation; it
    /// differs from `user_id` when an administrator generates on a member's
    /// behalf.
    pub async fn generate<S>(
        store: &S,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<DietPlanResponse, ApiError>
    where
        S: ProfileStore + PlanStore + ?Sized,
    {
        let profile = store
            .find_profile(user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let draft = generate_diet_plan(&profile)?;
        let plan = upsert(store, user_id, &draft, actor_id)
            .await
            .map_err(ApiError::Internal)?;

        metrics::counter!("gym_plans_generated_total", "kind" => "diet").increment(1);
        info!(
            user_id = %user_id,
            plan_id = %plan.id,
            goal = %draft.fitness_goal,
            calories = draft.total_calories,
            "Generated diet plan"
        );

        diet_response(plan)
    }

    /// The caller's active diet plan
    pub async fn get_active(pool: &PgPool, user_id: Uuid) -> Result<DietPlanResponse, ApiError> {
        let plan = DietPlanRepository::find_active(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("No active diet plan".to_string()))?;
        diet_response(plan)
    }
}
