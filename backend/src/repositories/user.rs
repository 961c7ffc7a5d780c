//! User repository for database operations

use super::to_decimal;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, age, gender, height_cm, weight_kg, \
     fitness_goal, bmi, bmi_category, role, is_active, last_login, created_at, updated_at";

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub gender: String,
    pub height_cm: Decimal,
    pub weight_kg: Decimal,
    pub fitness_goal: String,
    pub bmi: Decimal,
    pub bmi_category: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub fitness_goal: String,
    pub bmi: f64,
    pub bmi_category: String,
    pub role: String,
}

/// Partial update of a user; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub fitness_goal: Option<String>,
    pub bmi: Option<f64>,
    pub bmi_category: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(pool: &PgPool, input: CreateUser) -> Result<UserRecord> {
        let sql = format!(
            r#"
            INSERT INTO users (name, email, password_hash, age, gender, height_cm, weight_kg,
                               fitness_goal, bmi, bmi_category, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.age)
            .bind(&input.gender)
            .bind(to_decimal(input.height_cm)?)
            .bind(to_decimal(input.weight_kg)?)
            .bind(&input.fitness_goal)
            .bind(to_decimal(input.bmi)?)
            .bind(&input.bmi_category)
            .bind(&input.role)
            .fetch_one(pool)
            .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by email (expects a normalized address)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Check if an email is registered to any account other than `except`
    pub async fn email_exists(pool: &PgPool, email: &str, except: Option<Uuid>) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(except)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Apply a partial update and return the new row
    pub async fn update(pool: &PgPool, id: Uuid, input: UpdateUser) -> Result<Option<UserRecord>> {
        let sql = format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                age = COALESCE($5, age),
                gender = COALESCE($6, gender),
                height_cm = COALESCE($7, height_cm),
                weight_kg = COALESCE($8, weight_kg),
                fitness_goal = COALESCE($9, fitness_goal),
                bmi = COALESCE($10, bmi),
                bmi_category = COALESCE($11, bmi_category),
                role = COALESCE($12, role),
                is_active = COALESCE($13, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.age)
            .bind(&input.gender)
            .bind(input.height_cm.map(to_decimal).transpose()?)
            .bind(input.weight_kg.map(to_decimal).transpose()?)
            .bind(&input.fitness_goal)
            .bind(input.bmi.map(to_decimal).transpose()?)
            .bind(&input.bmi_category)
            .bind(&input.role)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Record a successful login
    pub async fn touch_last_login(pool: &PgPool, id: Uuid) -> Result<DateTime<Utc>> {
        let at: DateTime<Utc> =
            sqlx::query_scalar("UPDATE users SET last_login = NOW() WHERE id = $1 RETURNING last_login")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(at)
    }

    /// All users, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<UserRecord>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let users = sqlx::query_as::<_, UserRecord>(&sql).fetch_all(pool).await?;
        Ok(users)
    }

    /// The most recently created users
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<UserRecord>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1");
        let users = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(users)
    }

    /// Delete a user; plans and subscriptions cascade
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every account (seeding only)
    pub async fn delete_all(pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Total and active account counts
    pub async fn counts(pool: &PgPool) -> Result<(i64, i64)> {
        let counts: (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active) FROM users",
        )
        .fetch_one(pool)
        .await?;
        Ok(counts)
    }
}
