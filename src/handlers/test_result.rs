// src/handlers/test_result.rs

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError, models::test_result::SubmitTestResultRequest, services::TestResultService,
    utils::jwt::Claims,
};

/// Submits a test attempt for grading.
///
/// * Extracts the User ID from the token.
/// * Grades the answers server-side, ignoring any client-computed score.
/// * Returns the new attempt's id and aggregates.
/// * A body that does not deserialize is rejected as invalid input.
pub async fn submit_test_result(
    State(service): State<TestResultService>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<SubmitTestResultRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let Json(req) = payload?;
    let submitted = service.submit(user_id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Test result submitted successfully",
            "test_result": submitted,
        })),
    ))
}

/// Get one of the current user's test results.
pub async fn get_test_result(
    State(service): State<TestResultService>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = service.get(claims.user_id()?, &id).await?;
    Ok(Json(result))
}

/// List all test results of the current user (Recent first).
pub async fn list_user_test_results(
    State(service): State<TestResultService>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let results = service.list_for_user(claims.user_id()?).await?;
    Ok(Json(results))
}

/// List the current user's test results for one notebook (Recent first).
pub async fn list_notebook_test_results(
    State(service): State<TestResultService>,
    Extension(claims): Extension<Claims>,
    Path(notebook_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let results = service
        .list_for_notebook(claims.user_id()?, &notebook_id)
        .await?;
    Ok(Json(results))
}

/// Aggregated statistics for the current user's attempts on a notebook.
pub async fn get_test_result_stats(
    State(service): State<TestResultService>,
    Extension(claims): Extension<Claims>,
    Path(notebook_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let stats = service.stats(claims.user_id()?, &notebook_id).await?;
    Ok(Json(stats))
}
