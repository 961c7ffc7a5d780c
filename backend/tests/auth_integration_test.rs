//! Integration tests for registration, login and profile endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_returns_tokens_and_bmi() {
    let app = common::TestApp::new().await;

    let email = common::unique_email();
    let body = json!({
        "name": "Jane Smith",
        "email": email.to_uppercase(),
        "password": "password123",
        "age": 28,
        "gender": "female",
        "height": 165.0,
        "weight": 60.0,
        "fitness_goal": "weight_loss"
    });

    let (status, response) = app.post("/api/v1/auth/register", None, body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!response["access_token"].as_str().unwrap().is_empty());
    assert_eq!(response["token_type"], "Bearer");
    assert_eq!(response["user"]["email"], email.to_lowercase());
    assert_eq!(response["user"]["bmi"], 22.0);
    assert_eq!(response["user"]["bmi_category"], "Normal");
    assert_eq!(response["user"]["role"], "user");
    assert!(response["user"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;
    let member = app.register(json!({})).await;

    let (status, body) = app
        .post(
            "/api/v1/auth/register",
            None,
            json!({
                "name": "Copy Cat",
                "email": member.email,
                "password": "password123",
                "age": 30,
                "gender": "male",
                "height": 175.0,
                "weight": 70.0,
                "fitness_goal": "fitness"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_records_last_login() {
    let app = common::TestApp::new().await;
    let member = app.register(json!({})).await;

    let (status, body) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({"email": member.email, "password": "password123"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["user"]["last_login"].is_string());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;
    let member = app.register(json!({})).await;

    let (status, _) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({"email": member.email, "password": "wrong-password"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_deactivated_account_cannot_login() {
    let app = common::TestApp::new().await;
    let member = app.register(json!({})).await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(member.id)
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, _) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({"email": member.email, "password": "password123"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_refresh_issues_new_pair() {
    let app = common::TestApp::new().await;
    let member = app.register(json!({})).await;
    let (_, login) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({"email": member.email, "password": "password123"}),
        )
        .await;

    let (status, body) = app
        .post(
            "/api/v1/auth/refresh",
            None,
            json!({"refresh_token": login["refresh_token"]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_update_recomputes_bmi() {
    let app = common::TestApp::new().await;
    let member = app.register(json!({"height": 180.0, "weight": 75.0})).await;

    let (status, body) = app
        .put(
            "/api/v1/auth/profile",
            Some(&member.token),
            json!({"weight": 100.0, "fitness_goal": "muscle_gain"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weight"], 100.0);
    assert_eq!(body["bmi"], 30.9);
    assert_eq!(body["bmi_category"], "Obese");
    assert_eq!(body["fitness_goal"], "muscle_gain");

    let (_, fetched) = app.get("/api/v1/auth/profile", Some(&member.token)).await;
    assert_eq!(fetched["bmi"], 30.9);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_email_taken_by_other_account() {
    let app = common::TestApp::new().await;
    let first = app.register(json!({})).await;
    let second = app.register(json!({})).await;

    let (status, _) = app
        .put(
            "/api/v1/auth/profile",
            Some(&second.token),
            json!({"email": first.email}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Re-submitting one's own address is not a conflict
    let (status, _) = app
        .put(
            "/api/v1/auth/profile",
            Some(&second.token),
            json!({"email": second.email}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}
