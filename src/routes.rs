// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers::test_result, state::AppState, utils::jwt::auth_middleware};

/// Assembles the main application router.
///
/// * Every test-result route requires a bearer token.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store handle and configuration).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let test_result_routes = Router::new()
        .route("/", post(test_result::submit_test_result))
        .route("/user", get(test_result::list_user_test_results))
        .route("/{id}", get(test_result::get_test_result))
        .route(
            "/notebook/{notebook_id}",
            get(test_result::list_notebook_test_results),
        )
        .route(
            "/notebook/{notebook_id}/stats",
            get(test_result::get_test_result_stats),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api/test-results", test_result_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
