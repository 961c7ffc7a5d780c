//! Diet plan repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use gym_shared::diet::{DietPlanDraft, Meal};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const DIET_PLAN_COLUMNS: &str = "id, user_id, name, fitness_goal, bmi_category, total_calories, \
     total_protein, total_carbs, total_fats, breakfast, lunch, dinner, snacks, is_active, \
     generated_by, created_at, updated_at";

/// Diet plan record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DietPlanRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub fitness_goal: String,
    pub bmi_category: String,
    pub total_calories: i32,
    pub total_protein: i32,
    pub total_carbs: i32,
    pub total_fats: i32,
    pub breakfast: Json<Meal>,
    pub lunch: Json<Meal>,
    pub dinner: Json<Meal>,
    pub snacks: Json<Vec<Meal>>,
    pub is_active: bool,
    pub generated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrative override; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateDietPlan {
    pub name: Option<String>,
    pub total_calories: Option<i32>,
    pub total_protein: Option<i32>,
    pub total_carbs: Option<i32>,
    pub total_fats: Option<i32>,
    pub breakfast: Option<Meal>,
    pub lunch: Option<Meal>,
    pub dinner: Option<Meal>,
    pub snacks: Option<Vec<Meal>>,
    pub is_active: Option<bool>,
}

pub struct DietPlanRepository;

impl DietPlanRepository {
    /// The owner's active plan, if any
    pub async fn find_active(pool: &PgPool, user_id: Uuid) -> Result<Option<DietPlanRecord>> {
        let sql = format!(
            "SELECT {DIET_PLAN_COLUMNS} FROM diet_plans WHERE user_id = $1 AND is_active"
        );
        let plan = sqlx::query_as::<_, DietPlanRecord>(&sql)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(plan)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<DietPlanRecord>> {
        let sql = format!("SELECT {DIET_PLAN_COLUMNS} FROM diet_plans WHERE id = $1");
        let plan = sqlx::query_as::<_, DietPlanRecord>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(plan)
    }

    /// Insert a new active plan
    ///
    /// A concurrent insert for the same owner hits the partial unique index
    /// and turns into an update of the row that won, so the last writer's
    /// content is what remains.
    pub async fn insert_active(
        pool: &PgPool,
        user_id: Uuid,
        draft: &DietPlanDraft,
        generated_by: Uuid,
    ) -> Result<DietPlanRecord> {
        let sql = format!(
            r#"
            INSERT INTO diet_plans (user_id, fitness_goal, bmi_category, total_calories,
                                    total_protein, total_carbs, total_fats, breakfast, lunch,
                                    dinner, snacks, is_active, generated_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE, $12)
            ON CONFLICT (user_id) WHERE is_active DO UPDATE SET
                fitness_goal = EXCLUDED.fitness_goal,
                bmi_category = EXCLUDED.bmi_category,
                total_calories = EXCLUDED.total_calories,
                total_protein = EXCLUDED.total_protein,
                total_carbs = EXCLUDED.total_carbs,
                total_fats = EXCLUDED.total_fats,
                breakfast = EXCLUDED.breakfast,
                lunch = EXCLUDED.lunch,
                dinner = EXCLUDED.dinner,
                snacks = EXCLUDED.snacks,
                generated_by = EXCLUDED.generated_by,
                updated_at = NOW()
            RETURNING {DIET_PLAN_COLUMNS}
            "#
        );
        let plan = sqlx::query_as::<_, DietPlanRecord>(&sql)
            .bind(user_id)
            .bind(draft.fitness_goal.as_str())
            .bind(draft.bmi_category.as_str())
            .bind(draft.total_calories)
            .bind(draft.total_protein)
            .bind(draft.total_carbs)
            .bind(draft.total_fats)
            .bind(Json(&draft.breakfast))
            .bind(Json(&draft.lunch))
            .bind(Json(&draft.dinner))
            .bind(Json(&draft.snacks))
            .bind(generated_by)
            .fetch_one(pool)
            .await?;
        Ok(plan)
    }

    /// Overwrite the generated fields of an existing plan, keeping its name
    pub async fn replace_generated(
        pool: &PgPool,
        id: Uuid,
        draft: &DietPlanDraft,
        generated_by: Uuid,
    ) -> Result<Option<DietPlanRecord>> {
        let sql = format!(
            r#"
            UPDATE diet_plans SET
                fitness_goal = $2,
                bmi_category = $3,
                total_calories = $4,
                total_protein = $5,
                total_carbs = $6,
                total_fats = $7,
                breakfast = $8,
                lunch = $9,
                dinner = $10,
                snacks = $11,
                generated_by = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {DIET_PLAN_COLUMNS}
            "#
        );
        let plan = sqlx::query_as::<_, DietPlanRecord>(&sql)
            .bind(id)
            .bind(draft.fitness_goal.as_str())
            .bind(draft.bmi_category.as_str())
            .bind(draft.total_calories)
            .bind(draft.total_protein)
            .bind(draft.total_carbs)
            .bind(draft.total_fats)
            .bind(Json(&draft.breakfast))
            .bind(Json(&draft.lunch))
            .bind(Json(&draft.dinner))
            .bind(Json(&draft.snacks))
            .bind(generated_by)
            .fetch_optional(pool)
            .await?;
        Ok(plan)
    }

    /// Apply an administrative override
    ///
    /// Fails with a unique violation when activating a plan while its owner
    /// already has another active one.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: UpdateDietPlan,
    ) -> Result<Option<DietPlanRecord>, sqlx::Error> {
        let sql = format!(
            r#"
            UPDATE diet_plans SET
                name = COALESCE($2, name),
                total_calories = COALESCE($3, total_calories),
                total_protein = COALESCE($4, total_protein),
                total_carbs = COALESCE($5, total_carbs),
                total_fats = COALESCE($6, total_fats),
                breakfast = COALESCE($7, breakfast),
                lunch = COALESCE($8, lunch),
                dinner = COALESCE($9, dinner),
                snacks = COALESCE($10, snacks),
                is_active = COALESCE($11, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {DIET_PLAN_COLUMNS}
            "#
        );
        sqlx::query_as::<_, DietPlanRecord>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.total_calories)
            .bind(input.total_protein)
            .bind(input.total_carbs)
            .bind(input.total_fats)
            .bind(input.breakfast.map(Json))
            .bind(input.lunch.map(Json))
            .bind(input.dinner.map(Json))
            .bind(input.snacks.map(Json))
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// All plans, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<DietPlanRecord>> {
        let sql = format!("SELECT {DIET_PLAN_COLUMNS} FROM diet_plans ORDER BY created_at DESC");
        let plans = sqlx::query_as::<_, DietPlanRecord>(&sql)
            .fetch_all(pool)
            .await?;
        Ok(plans)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM diet_plans")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
