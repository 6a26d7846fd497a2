use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use trusteze::config::Config;

/// Demo account password seeded on startup (must match `SeedConfig`).
const DEMO_PASSWORD: &str = "TrustEze2024!";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // A single pooled connection keeps the in-memory database alive and
    // shared for the whole test.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = trusteze::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    trusteze::api::router(state).await
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn empty_body_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref());
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({ "email": email, "password": DEMO_PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn first_property_id(app: &Router) -> String {
    let response = app.clone().oneshot(get("/api/properties")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["data"]["items"][0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_register_and_login() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            serde_json::json!({
                "email": "new.user@example.com",
                "password": "averygoodpassword",
                "name": "New User",
                "phone": "(555) 010-1234"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].is_string());
    assert!(body["data"]["expiresAt"].is_string());
    assert_eq!(body["data"]["user"]["email"], "new.user@example.com");
    assert_eq!(body["data"]["user"]["phone"], "(555) 010-1234");
    assert!(body["data"]["user"]["passwordHash"].is_null());

    // Same email again is rejected.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            serde_json::json!({
                "email": "new.user@example.com",
                "password": "averygoodpassword",
                "name": "Second User"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The fresh account can log in.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({
                "email": "new.user@example.com",
                "password": "averygoodpassword"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"]["user"]["lastLoginAt"].is_string());
}

#[tokio::test]
async fn test_register_validation() {
    let app = spawn_app().await;

    for payload in [
        serde_json::json!({ "email": "not-an-email", "password": "averygoodpassword", "name": "X" }),
        serde_json::json!({ "email": "a@b.co", "password": "short", "name": "X" }),
        serde_json::json!({ "email": "a@b.co", "password": "averygoodpassword", "name": "  " }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/register", None, payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({
                "email": "buyer@trusteze.com",
                "password": "wrong-password"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({
                "email": "nobody@trusteze.com",
                "password": DEMO_PASSWORD
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = spawn_app().await;

    for uri in [
        "/api/users/profile",
        "/api/users/saved-properties",
        "/api/users/recently-viewed",
        "/api/properties/search",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

        let response = app
            .clone()
            .oneshot(get_with_token(uri, "not-a-real-token"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_profile_get_and_update() {
    let app = spawn_app().await;
    let token = login(&app, "buyer@trusteze.com").await;

    let response = app
        .clone()
        .oneshot(get_with_token("/api/users/profile", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["email"], "buyer@trusteze.com");
    assert_eq!(body["data"]["roles"], serde_json::json!(["Buyer"]));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/users/profile",
            Some(&token),
            serde_json::json!({ "name": "Blake C.", "phone": "(555) 010-0000" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Blake C.");
    assert_eq!(body["data"]["phone"], "(555) 010-0000");
    // Untouched fields survive a partial update.
    assert_eq!(body["data"]["email"], "buyer@trusteze.com");
}

#[tokio::test]
async fn test_saved_properties_flow() {
    let app = spawn_app().await;
    let token = login(&app, "investor@trusteze.com").await;
    let property_id = first_property_id(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_token("/api/users/saved-properties", &token))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"], serde_json::json!([]));

    let save_uri = format!("/api/users/saved-properties/{property_id}");
    let response = app
        .clone()
        .oneshot(empty_body_request("POST", &save_uri, &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Saving twice is a conflict.
    let response = app
        .clone()
        .oneshot(empty_body_request("POST", &save_uri, &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(get_with_token("/api/users/saved-properties", &token))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], property_id.as_str());

    let response = app
        .clone()
        .oneshot(empty_body_request("DELETE", &save_uri, &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Removing again finds nothing.
    let response = app
        .clone()
        .oneshot(empty_body_request("DELETE", &save_uri, &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_saving_unknown_property_is_not_found() {
    let app = spawn_app().await;
    let token = login(&app, "investor@trusteze.com").await;

    let response = app
        .clone()
        .oneshot(empty_body_request(
            "POST",
            "/api/users/saved-properties/no-such-property",
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_view_tracking_and_recently_viewed() {
    let app = spawn_app().await;
    let token = login(&app, "buyer@trusteze.com").await;

    let response = app.clone().oneshot(get("/api/properties")).await.unwrap();
    let body = body_json(response).await;
    let first = body["data"]["items"][0]["id"].as_str().unwrap().to_string();
    let second = body["data"]["items"][1]["id"].as_str().unwrap().to_string();

    // An anonymous read leaves no history.
    let response = app
        .clone()
        .oneshot(get(&format!("/api/properties/{first}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_with_token("/api/users/recently-viewed", &token))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"], serde_json::json!([]));

    // Signed-in reads are recorded, newest first, without duplicates.
    for id in [&first, &second, &first] {
        let response = app
            .clone()
            .oneshot(get_with_token(&format!("/api/properties/{id}"), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get_with_token("/api/users/recently-viewed", &token))
        .await
        .unwrap();
    let body = body_json(response).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], first.as_str());
    assert_eq!(items[1]["id"], second.as_str());
}
