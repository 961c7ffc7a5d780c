//! Workout plan repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use gym_shared::workout::{Exercise, WorkoutPlanDraft};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const WORKOUT_PLAN_COLUMNS: &str = "id, user_id, name, fitness_goal, difficulty, \
     duration_minutes, exercises, is_active, generated_by, created_at, updated_at";

/// Workout plan record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutPlanRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub fitness_goal: String,
    pub difficulty: String,
    pub duration_minutes: i32,
    pub exercises: Json<Vec<Exercise>>,
    pub is_active: bool,
    pub generated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrative override; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateWorkoutPlan {
    pub name: Option<String>,
    pub difficulty: Option<String>,
    pub duration_minutes: Option<i32>,
    pub exercises: Option<Vec<Exercise>>,
    pub is_active: Option<bool>,
}

pub struct WorkoutPlanRepository;

impl WorkoutPlanRepository {
    /// The owner's active plan, if any
    pub async fn find_active(pool: &PgPool, user_id: Uuid) -> Result<Option<WorkoutPlanRecord>> {
        let sql = format!(
            "SELECT {WORKOUT_PLAN_COLUMNS} FROM workout_plans WHERE user_id = $1 AND is_active"
        );
        let plan = sqlx::query_as::<_, WorkoutPlanRecord>(&sql)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(plan)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<WorkoutPlanRecord>> {
        let sql = format!("SELECT {WORKOUT_PLAN_COLUMNS} FROM workout_plans WHERE id = $1");
        let plan = sqlx::query_as::<_, WorkoutPlanRecord>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(plan)
    }

    /// Insert a new active plan, resolving a concurrent insert as last write wins
    pub async fn insert_active(
        pool: &PgPool,
        user_id: Uuid,
        draft: &WorkoutPlanDraft,
        generated_by: Uuid,
    ) -> Result<WorkoutPlanRecord> {
        let sql = format!(
            r#"
            INSERT INTO workout_plans (user_id, fitness_goal, difficulty, duration_minutes,
                                       exercises, is_active, generated_by)
            VALUES ($1, $2, $3, $4, $5, TRUE, $6)
            ON CONFLICT (user_id) WHERE is_active DO UPDATE SET
                fitness_goal = EXCLUDED.fitness_goal,
                difficulty = EXCLUDED.difficulty,
                duration_minutes = EXCLUDED.duration_minutes,
                exercises = EXCLUDED.exercises,
                generated_by = EXCLUDED.generated_by,
                updated_at = NOW()
            RETURNING {WORKOUT_PLAN_COLUMNS}
            "#
        );
        let plan = sqlx::query_as::<_, WorkoutPlanRecord>(&sql)
            .bind(user_id)
            .bind(draft.fitness_goal.as_str())
            .bind(draft.difficulty.as_str())
            .bind(draft.duration_minutes)
            .bind(Json(&draft.exercises))
            .bind(generated_by)
            .fetch_one(pool)
            .await?;
        Ok(plan)
    }

    /// Overwrite the generated fields of an existing plan, keeping its name
    pub async fn replace_generated(
        pool: &PgPool,
        id: Uuid,
        draft: &WorkoutPlanDraft,
        generated_by: Uuid,
    ) -> Result<Option<WorkoutPlanRecord>> {
        let sql = format!(
            r#"
            UPDATE workout_plans SET
                fitness_goal = $2,
                difficulty = $3,
                duration_minutes = $4,
                exercises = $5,
                generated_by = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {WORKOUT_PLAN_COLUMNS}
            "#
        );
        let plan = sqlx::query_as::<_, WorkoutPlanRecord>(&sql)
            .bind(id)
            .bind(draft.fitness_goal.as_str())
            .bind(draft.difficulty.as_str())
            .bind(draft.duration_minutes)
            .bind(Json(&draft.exercises))
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
        input: UpdateWorkoutPlan,
    ) -> Result<Option<WorkoutPlanRecord>, sqlx::Error> {
        let sql = format!(
            r#"
            UPDATE workout_plans SET
                name = COALESCE($2, name),
                difficulty = COALESCE($3, difficulty),
                duration_minutes = COALESCE($4, duration_minutes),
                exercises = COALESCE($5, exercises),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {WORKOUT_PLAN_COLUMNS}
            "#
        );
        sqlx::query_as::<_, WorkoutPlanRecord>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.difficulty)
            .bind(input.duration_minutes)
            .bind(input.exercises.map(Json))
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// All plans, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<WorkoutPlanRecord>> {
        let sql =
            format!("SELECT {WORKOUT_PLAN_COLUMNS} FROM workout_plans ORDER BY created_at DESC");
        let plans = sqlx::query_as::<_, WorkoutPlanRecord>(&sql)
            .fetch_all(pool)
            .await?;
        Ok(plans)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workout_plans")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
