// tests/router_tests.rs

//! Drives the router in-process with `tower::ServiceExt::oneshot`, no socket.

use std::{sync::Arc, time::Duration};

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use cognivia::{
    config::Config,
    routes,
    state::AppState,
    store::{MemoryStore, Store},
    utils::jwt::sign_jwt,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> axum::Router {
    let store = Store::new(Arc::new(MemoryStore::new()), Duration::from_secs(10));
    routes::create_router(AppState {
        store,
        config: Config::local("router_test_secret"),
    })
}

#[tokio::test]
async fn unknown_path_is_404() {
    let response = app()
        .oneshot(Request::get("/random_path_that_does_not_exist").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let token = sign_jwt(Uuid::new_v4(), "some_other_secret", 60).unwrap();

    let response = app()
        .oneshot(
            Request::get("/api/test-results/user")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["kind"], "unauthorized");
}

#[tokio::test]
async fn malformed_notebook_id_in_path_is_bad_request() {
    let token = sign_jwt(Uuid::new_v4(), "router_test_secret", 60).unwrap();

    let response = app()
        .oneshot(
            Request::get("/api/test-results/notebook/not-a-uuid/stats")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_test_result_is_404() {
    let token = sign_jwt(Uuid::new_v4(), "router_test_secret", 60).unwrap();

    let response = app()
        .oneshot(
            Request::get(format!("/api/test-results/{}", Uuid::new_v4()))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "test result not found or does not belong to user");
}

#[tokio::test]
async fn non_json_body_is_invalid_input() {
    let token = sign_jwt(Uuid::new_v4(), "router_test_secret", 60).unwrap();

    let response = app()
        .oneshot(
            Request::post("/api/test-results")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["kind"], "invalid_input");
}
