//! Seed the database with an administrator and sample members
//!
//! Destructive: every existing account (and, by cascade, every plan and
//! subscription) is removed first.

use anyhow::{Context, Result};
use chrono::Utc;
use gym_backend::auth::PasswordService;
use gym_backend::repositories::{CreateUser, UserRecord, UserRepository};
use gym_backend::services::{DietService, SubscriptionService, WorkoutService};
use gym_backend::{config, db};
use gym_shared::{calculate_bmi_result, PaymentMethod, Role, SubscriptionPlanType};
use tracing::{info, warn};

struct SeedAccount {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    age: i32,
    gender: &'static str,
    height_cm: f64,
    weight_kg: f64,
    fitness_goal: &'static str,
    role: Role,
}

const ADMIN: SeedAccount = SeedAccount {
    name: "Admin User",
    email: "admin@gym.com",
    password: "admin123",
    age: 30,
    gender: "male",
    height_cm: 175.0,
    weight_kg: 70.0,
    fitness_goal: "fitness",
    role: Role::Admin,
};

const MEMBERS: [SeedAccount; 4] = [
    SeedAccount {
        name: "John Doe",
        email: "john@example.com",
        password: "password123",
        age: 25,
        gender: "male",
        height_cm: 180.0,
        weight_kg: 75.0,
        fitness_goal: "muscle_gain",
        role: Role::User,
    },
    SeedAccount {
        name: "Jane Smith",
        email: "jane@example.com",
        password: "password123",
        age: 28,
        gender: "female",
        height_cm: 165.0,
        weight_kg: 60.0,
        fitness_goal: "weight_loss",
        role: Role::User,
    },
    SeedAccount {
        name: "Mike Johnson",
        email: "mike@example.com",
        password: "password123",
        age: 35,
        gender: "male",
        height_cm: 175.0,
        weight_kg: 80.0,
        fitness_goal: "fitness",
        role: Role::User,
    },
    SeedAccount {
        name: "Sarah Wilson",
        email: "sarah@example.com",
        password: "password123",
        age: 32,
        gender: "female",
        height_cm: 160.0,
        weight_kg: 55.0,
        fitness_goal: "maintenance",
        role: Role::User,
    },
];

async fn create_account(pool: &sqlx::PgPool, account: &SeedAccount) -> Result<UserRecord> {
    let password_hash = PasswordService::hash(account.password.to_string()).await?;
    let bmi = calculate_bmi_result(account.height_cm, account.weight_kg);
    let user = UserRepository::create(
        pool,
        CreateUser {
            name: account.name.to_string(),
            email: account.email.to_string(),
            password_hash,
            age: account.age,
            gender: account.gender.to_string(),
            height_cm: account.height_cm,
            weight_kg: account.weight_kg,
            fitness_goal: account.fitness_goal.to_string(),
            bmi: bmi.bmi,
            bmi_category: bmi.category.to_string(),
            role: account.role.to_string(),
        },
    )
    .await
    .with_context(|| format!("creating {}", account.email))?;
    Ok(user)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,gym_backend=info".into()),
        )
        .init();

    let config = config::AppConfig::load()?;
    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;

    let removed = UserRepository::delete_all(&pool).await?;
    info!(removed, "Cleared existing accounts");

    let admin = create_account(&pool, &ADMIN).await?;
    info!(email = %admin.email, "Admin account created");

    let mut members = Vec::with_capacity(MEMBERS.len());
    for account in &MEMBERS {
        members.push(create_account(&pool, account).await?);
    }

    for member in &members {
        // Generation errors are reported with the failing account and skipped
        if let Err(e) = DietService::generate(&pool, member.id, admin.id).await {
            warn!(email = %member.email, error = %e, "Diet plan not generated");
        }
        if let Err(e) = WorkoutService::generate(&pool, member.id, admin.id).await {
            warn!(email = %member.email, error = %e, "Workout plan not generated");
        }
    }

    if let Some(first) = members.first() {
        SubscriptionService::create(
            &pool,
            first.id,
            SubscriptionPlanType::Premium,
            PaymentMethod::CreditCard,
            Utc::now(),
        )
        .await
        .map_err(|e| anyhow::anyhow!("creating sample subscription: {}", e))?;
    }

    info!(members = members.len(), "Seed data created successfully");
    Ok(())
}
