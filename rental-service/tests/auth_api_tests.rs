mod common;

use auth::Role;
use common::TestApp;
use common::TEST_PASSWORD;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_then_login_issues_customer_token() {
    let app = TestApp::spawn().await;

    let response = app.register("New Tenant", "new@test.com", "Abc12345!").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["success"], true);
    assert_eq!(body["data"]["message"], "User registered successfully");
    assert!(body["data"]["token"].is_null());

    let response = app.login("new@test.com", "Abc12345!").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["identity"]["email"], "new@test.com");
    assert_eq!(body["data"]["identity"]["role"], "CUSTOMER");
    assert!(body["data"]["identity"]["passwordHash"].is_null());

    let token = body["data"]["token"].as_str().expect("Missing token");
    let claims = app
        .authenticator
        .validate_token(token)
        .expect("Issued token should verify");
    assert_eq!(claims.role, Role::Customer);
    assert_eq!(claims.email, "new@test.com");
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
}

#[tokio::test]
async fn test_register_email_conflict_ignores_case() {
    let app = TestApp::spawn().await;

    let first = app.register("First Tenant", "A@x.com", "Abc12345!").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.register("Second Tenant", "a@x.com", "Abc12345!").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 409);
    assert_eq!(body["data"]["message"], "Email already exists");
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "fullName": "New Tenant",
            "email": "new@test.com",
            "password": "Abc12345!",
            "confirmPassword": "Abc12345?"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Passwords do not match");
}

#[tokio::test]
async fn test_register_disposable_email() {
    let app = TestApp::spawn().await;

    let response = app
        .register("New Tenant", "someone@guerrillamail.com", "Abc12345!")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Please use a valid email address");
}

#[tokio::test]
async fn test_register_weak_password_rejected_before_service() {
    let app = TestApp::spawn().await;

    let response = app.register("New Tenant", "new@test.com", "password").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was stored.
    let response = app.login("new@test.com", "password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Known Tenant", "known@test.com", "Abc12345!").await;

    let unknown = app.login("nobody@test.com", "Abc12345!").await;
    let wrong_password = app.login("known@test.com", "Wrong12345!").await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown: Value = unknown.json().await.expect("Failed to parse response");
    let wrong_password: Value = wrong_password.json().await.expect("Failed to parse response");
    assert_eq!(unknown, wrong_password);
    assert_eq!(unknown["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::spawn().await;
    app.register("Known Tenant", "known@test.com", "Abc12345!").await;

    let response = app.login("  KNOWN@Test.com ", "Abc12345!").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_returns_caller_profile() {
    let app = TestApp::spawn().await;
    app.register("Known Tenant", "known@test.com", "Abc12345!").await;
    let token = app.login_token("known@test.com", "Abc12345!").await;

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["fullName"], "Known Tenant");
    assert_eq!(body["data"]["email"], "known@test.com");
    assert_eq!(body["data"]["role"], "CUSTOMER");
}

#[tokio::test]
async fn test_admin_creates_admin() {
    let app = TestApp::spawn().await;
    let (_, admin_token) = app.seed_session("root@test.com", Role::Admin).await;

    let response = app
        .post_authenticated("/api/admin/create", &admin_token)
        .json(&json!({ "email": "second@test.com", "password": "Adm1n!pass" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "ADMIN");
    assert_eq!(body["data"]["fullName"], "Admin User");

    let token = app.login_token("second@test.com", "Adm1n!pass").await;
    let claims = app.authenticator.validate_token(&token).unwrap();
    assert_eq!(claims.role, Role::Admin);
}

#[tokio::test]
async fn test_admin_creation_is_not_public() {
    let app = TestApp::spawn().await;
    let (_, customer_token) = app.seed_session("customer@test.com", Role::Customer).await;

    let anonymous = app
        .post("/api/admin/create")
        .json(&json!({ "email": "sneaky@test.com", "password": "Adm1n!pass" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let customer = app
        .post_authenticated("/api/admin/create", &customer_token)
        .json(&json!({ "email": "sneaky@test.com", "password": "Adm1n!pass" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(customer.status(), StatusCode::FORBIDDEN);

    let response = app.login("sneaky@test.com", "Adm1n!pass").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_lists_identities_and_stats() {
    let app = TestApp::spawn().await;
    let (_, admin_token) = app.seed_session("root@test.com", Role::Admin).await;
    app.seed_identity("collab@test.com", Role::Collaborator).await;
    for i in 0..3 {
        app.register("Some Tenant", &format!("tenant{}@test.com", i), TEST_PASSWORD)
            .await;
    }

    let response = app
        .get_authenticated("/api/admin/users?page=1&limit=2&role=CUSTOMER", &admin_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["totalItems"], 3);
    assert_eq!(body["data"]["pagination"]["totalPages"], 2);
    assert_eq!(body["data"]["pagination"]["hasNextPage"], true);

    let response = app
        .get_authenticated("/api/admin/users/stats", &admin_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["totalUsers"], 5);
    assert_eq!(body["data"]["usersByRole"]["admins"], 1);
    assert_eq!(body["data"]["usersByRole"]["collaborators"], 1);
    assert_eq!(body["data"]["usersByRole"]["customers"], 3);
}

#[tokio::test]
async fn test_list_identities_rejects_bad_pagination() {
    let app = TestApp::spawn().await;
    let (_, admin_token) = app.seed_session("root@test.com", Role::Admin).await;

    let response = app
        .get_authenticated("/api/admin/users?page=1&limit=500", &admin_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
