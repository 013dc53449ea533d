mod common;

use auth::Role;
use auth::TokenCodec;
use chrono::Duration;
use common::room_body;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_public_route_needs_no_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/rooms")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_route_ignores_bad_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/rooms", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["data"]["message"], "Unauthorized");
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let app = TestApp::spawn().await;
    let (_, token) = app.seed_session("root@test.com", Role::Admin).await;

    let response = app
        .get("/api/auth/me")
        .header("Authorization", format!("Token {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_customer_forbidden_admin_allowed() {
    let app = TestApp::spawn().await;
    let (_, customer_token) = app.seed_session("customer@test.com", Role::Customer).await;
    let (_, admin_token) = app.seed_session("root@test.com", Role::Admin).await;

    let customer = app
        .post_authenticated("/api/rooms", &customer_token)
        .json(&room_body())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(customer.status(), StatusCode::FORBIDDEN);
    let body: Value = customer.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Forbidden resource");

    let admin = app
        .post_authenticated("/api/rooms", &admin_token)
        .json(&room_body())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(admin.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_rejected_tokens_share_one_response() {
    let app = TestApp::spawn().await;
    let (admin, token) = app.seed_session("root@test.com", Role::Admin).await;

    let forged = TokenCodec::new(b"attacker-secret-that-is-long-enough!!")
        .issue(&admin.subject(), Duration::hours(1))
        .unwrap();
    let expired = app.expired_token(&admin);
    let mut tampered = token.clone().into_bytes();
    let signature_start = token.rfind('.').unwrap() + 1;
    tampered[signature_start] = if tampered[signature_start] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let mut bodies = Vec::new();
    for bad in [forged, expired, tampered, "garbage".to_string()] {
        let response = app
            .get_authenticated("/api/auth/me", &bad)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(response.json::<Value>().await.unwrap());
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));

    let valid = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(valid.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_token_of_deleted_identity_is_rejected() {
    let app = TestApp::spawn().await;
    let (admin, token) = app.seed_session("root@test.com", Role::Admin).await;

    app.store.remove(&admin.id).await.expect("Identity was seeded");

    let response = app
        .get_authenticated("/api/admin/users/stats", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/nowhere")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
