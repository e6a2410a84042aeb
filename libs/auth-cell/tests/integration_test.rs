use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_cell::router::auth_routes;
use shared_utils::test_utils::{read_json, test_state, TestUser};

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_signup_then_user_is_listed() {
    let (state, _) = test_state().await;
    let app: Router = auth_routes(state);
    let user = TestUser::doctor("Dr. Strange", "strange@example.com");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/signup", user.signup_body()))
        .await
        .unwrap();
    let (status, created) = read_json(response).await;
    assert_eq!(status, StatusCode::CREATED);

    let response = app.oneshot(get_request("/users")).await.unwrap();
    let (status, users) = read_json(response).await;

    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["_id"], created["_id"]);
    assert_eq!(users[0]["email"], "strange@example.com");
}

#[tokio::test]
async fn test_signup_mismatch_creates_no_user() {
    let (state, store) = test_state().await;
    let app = auth_routes(state);

    let body = json!({
        "name": "Jane",
        "email": "jane@example.com",
        "password": "one",
        "confirmPassword": "two",
        "role": "patient"
    });
    let response = app.oneshot(json_request("POST", "/signup", body)).await.unwrap();
    let (status, error) = read_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({ "error": "Passwords do not match" }));
    assert_eq!(store.count("users").await, 0);
}

#[tokio::test]
async fn test_signup_duplicate_email_returns_500() {
    let (state, store) = test_state().await;
    let app = auth_routes(state);
    let user = TestUser::patient("Jane", "jane@example.com");

    let first = app
        .clone()
        .oneshot(json_request("POST", "/signup", user.signup_body()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/signup", user.signup_body()))
        .await
        .unwrap();
    let (status, error) = read_json(second).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["error"], "Failed to save user");
    assert_eq!(store.count("users").await, 1);
}

#[tokio::test]
async fn test_login_round_trip() {
    let (state, _) = test_state().await;
    let app = auth_routes(state);
    let user = TestUser::patient("Jane", "jane@example.com");

    app.clone()
        .oneshot(json_request("POST", "/signup", user.signup_body()))
        .await
        .unwrap();

    let ok = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            json!({ "username": "Jane", "password": user.password }),
        ))
        .await
        .unwrap();
    let (status, body) = read_json(ok).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    let rejected = app
        .oneshot(json_request(
            "POST",
            "/login",
            json!({ "username": "Jane", "password": "guess" }),
        ))
        .await
        .unwrap();
    let (status, body) = read_json(rejected).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_by_email_is_rejected() {
    let (state, _) = test_state().await;
    let app = auth_routes(state.clone());
    let user = TestUser::patient("Jane", "jane@example.com");
    user.insert(&state).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/login",
            json!({ "username": "jane@example.com", "password": user.password }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
