//! Integration tests for the administration endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_members_are_forbidden() {
    let app = common::TestApp::new().await;
    let member = app.register(json!({})).await;

    let (status, body) = app.get("/api/v1/admin/dashboard", Some(&member.token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_counts() {
    let app = common::TestApp::new().await;
    let admin = app.register_admin().await;

    let (status, body) = app.get("/api/v1/admin/dashboard", Some(&admin.token)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["stats"]["total_users"].as_i64().unwrap() >= 1);
    assert!(body["stats"]["active_users"].as_i64().unwrap() >= 1);
    assert!(body["recent_users"].as_array().unwrap().len() <= 5);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_updates_member_and_recomputes_bmi() {
    let app = common::TestApp::new().await;
    let admin = app.register_admin().await;
    let member = app.register(json!({"height": 160.0, "weight": 55.0})).await;

    let (status, body) = app
        .put(
            &format!("/api/v1/admin/users/{}", member.id),
            Some(&admin.token),
            json!({"height": 170.0, "is_active": false, "role": "user"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["height"], 170.0);
    assert_eq!(body["bmi"], 19.0);
    assert_eq!(body["is_active"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_rejects_unknown_role() {
    let app = common::TestApp::new().await;
    let admin = app.register_admin().await;
    let member = app.register(json!({})).await;

    let (status, body) = app
        .put(
            &format!("/api/v1/admin/users/{}", member.id),
            Some(&admin.token),
            json!({"role": "owner"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "role");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_user_cascades_to_plans() {
    let app = common::TestApp::new().await;
    let admin = app.register_admin().await;
    let member = app.register(json!({})).await;
    app.post("/api/v1/diet/generate", Some(&member.token), json!({}))
        .await;

    let (status, _) = app
        .delete(&format!("/api/v1/admin/users/{}", member.id), Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM diet_plans WHERE user_id = $1")
        .bind(member.id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let (status, _) = app
        .get(&format!("/api/v1/admin/users/{}", member.id), Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_activating_second_plan_conflicts() {
    let app = common::TestApp::new().await;
    let admin = app.register_admin().await;
    let member = app.register(json!({})).await;

    let (_, first) = app
        .post("/api/v1/diet/generate", Some(&member.token), json!({}))
        .await;
    let first_id = first["id"].as_str().unwrap().to_string();

    // Retire the first plan so generation creates a second row
    let (status, _) = app
        .put(
            &format!("/api/v1/admin/diet-plans/{}", first_id),
            Some(&admin.token),
            json!({"is_active": false}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = app
        .post("/api/v1/diet/generate", Some(&member.token), json!({}))
        .await;
    assert_ne!(second["id"], first["id"]);

    let (status, body) = app
        .put(
            &format!("/api/v1/admin/diet-plans/{}", first_id),
            Some(&admin.token),
            json!({"is_active": true}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_regeneration_keeps_overridden_name() {
    let app = common::TestApp::new().await;
    let admin = app.register_admin().await;
    let member = app.register(json!({})).await;

    let (_, plan) = app
        .post("/api/v1/workout/generate", Some(&member.token), json!({}))
        .await;
    let (status, _) = app
        .put(
            &format!("/api/v1/admin/workout-plans/{}", plan["id"].as_str().unwrap()),
            Some(&admin.token),
            json!({"name": "Coach's plan"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, regenerated) = app
        .post("/api/v1/workout/generate", Some(&member.token), json!({}))
        .await;
    assert_eq!(regenerated["id"], plan["id"]);
    assert_eq!(regenerated["name"], "Coach's plan");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_subscription_end_date_follows_duration() {
    let app = common::TestApp::new().await;
    let admin = app.register_admin().await;
    let member = app.register(json!({})).await;

    let subscription_id: uuid::Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO subscriptions (user_id, plan_type, plan_name, price, duration_days,
                                   start_date, end_date, status, payment_status,
                                   payment_method, features, auto_renew)
        VALUES ($1, 'basic', 'Basic Monthly', 29.99, 30, '2024-01-01T00:00:00Z',
                '2024-01-31T00:00:00Z', 'active', 'completed', 'paypal', ARRAY['Gym access'], TRUE)
        RETURNING id
        "#,
    )
    .bind(member.id)
    .fetch_one(&app.pool)
    .await
    .unwrap();

    let (status, body) = app
        .put(
            &format!("/api/v1/admin/subscriptions/{}", subscription_id),
            Some(&admin.token),
            json!({"duration_days": 90}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration_days"], 90);
    assert!(body["end_date"].as_str().unwrap().starts_with("2024-03-31"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_malformed_id_is_bad_request() {
    let app = common::TestApp::new().await;
    let admin = app.register_admin().await;

    let (status, _) = app
        .get("/api/v1/admin/users/not-a-uuid", Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
