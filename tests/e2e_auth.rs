// tests/e2e_auth.rs
mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::*;

async fn login(app: &TestApp) -> String {
    let resp = app
        .send(post_json(
            "/login",
            None,
            json!({ "username": ACTIVE_USER, "password": ACTIVE_PASSWORD }),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["user"]["username"], ACTIVE_USER);
    assert!(body["token"]["session_id"].as_str().is_some());
    body["token"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn login_token_reaches_protected_routes() {
    let app = TestApp::new();
    let token = login(&app).await;

    let resp = app.send(get("/articles", Some(&token))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.send(get("/user", Some(&token))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile = read_json(resp).await;
    assert_eq!(profile["user"]["id"], 1);
    assert_eq!(profile["user"]["username"], ACTIVE_USER);
    assert_eq!(profile["user"]["is_active"], true);
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let app = TestApp::new();
    let token = login(&app).await;

    let resp = app.send(post_json("/logout", Some(&token), json!({}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, json!({ "status": "logged_out" }));

    let resp = app.send(get("/articles", Some(&token))).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    // A fresh login is unaffected.
    let again = login(&app).await;
    let resp = app.send(get("/user", Some(&again))).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn bad_credentials_are_401() {
    let app = TestApp::new();

    for (username, password) in [
        (ACTIVE_USER, "wrong-password"),
        ("nobody", ACTIVE_PASSWORD),
        ("x", ACTIVE_PASSWORD),
    ] {
        let resp = app
            .send(post_json(
                "/login",
                None,
                json!({ "username": username, "password": password }),
            ))
            .await;
        assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
    }
}

#[tokio::test]
async fn disabled_accounts_are_403() {
    let app = TestApp::new();
    let resp = app
        .send(post_json(
            "/login",
            None,
            json!({ "username": INACTIVE_USER, "password": ACTIVE_PASSWORD }),
        ))
        .await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn profile_and_logout_need_a_token() {
    let app = TestApp::new();

    let resp = app.send(get("/user", None)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    let resp = app.send(post_json("/logout", None, json!({}))).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let app = TestApp::new();

    let resp = app.send(get("/health", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, json!({ "status": "ok" }));

    let resp = app.send(get("/openapi.json", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = read_json(resp).await;
    assert!(doc["paths"]["/articles"].is_object());
    assert!(doc["paths"]["/articles/{id}"].is_object());
}
