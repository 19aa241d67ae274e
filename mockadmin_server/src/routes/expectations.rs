//! Expectation routes: list, create, delete by criteria, delete all

use crate::error::ApiError;
use crate::routes::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{delete, get},
    Json, Router,
};
use mockadmin_common::{ExpectationDraft, ExpectationRow, ExpectationSelector};
use serde::Serialize;
use serde_json::Value;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/expectations",
            get(list_expectations)
                .post(create_expectation)
                .delete(delete_expectations),
        )
        .route("/api/expectations/all", delete(delete_all_expectations))
        .route("/api/expectations/view", get(expectation_rows))
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
}

#[derive(Debug, Serialize)]
struct CreateResponse {
    success: bool,
    result: Value,
}

/// Active expectations exactly as MockServer returns them
async fn list_expectations(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let expectations = state
        .mockserver
        .retrieve_active_expectations()
        .await
        .map_err(ApiError::upstream("retrieve expectations"))?;

    if expectations.is_null() {
        return Ok(Json(Value::Array(Vec::new())));
    }
    Ok(Json(expectations))
}

/// Active expectations shaped for the expectations table
async fn expectation_rows(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpectationRow>>, ApiError> {
    let expectations = state
        .mockserver
        .retrieve_active_expectations()
        .await
        .map_err(ApiError::upstream("retrieve expectations"))?;

    Ok(Json(ExpectationRow::rows(&expectations)))
}

async fn create_expectation(
    State(state): State<AppState>,
    payload: Result<Json<ExpectationDraft>, JsonRejection>,
) -> Result<Json<CreateResponse>, ApiError> {
    let Json(draft) = payload?;
    let expectation = draft.into_expectation()?;

    tracing::info!(
        "Creating expectation {} {}",
        expectation.http_request.method,
        expectation.http_request.path
    );

    let result = state
        .mockserver
        .add_expectation(&expectation)
        .await
        .map_err(ApiError::upstream("create expectation"))?;

    Ok(Json(CreateResponse {
        success: true,
        result,
    }))
}

async fn delete_expectations(
    State(state): State<AppState>,
    payload: Result<Json<ExpectationSelector>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(selector) = payload?;
    let criteria = selector.into_clear_criteria()?;

    tracing::info!(
        "Clearing expectations for {} {}",
        criteria.http_request.method,
        criteria.http_request.path
    );

    state
        .mockserver
        .clear(&criteria)
        .await
        .map_err(ApiError::upstream("clear expectation"))?;

    Ok(Json(SuccessResponse { success: true }))
}

async fn delete_all_expectations(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse>, ApiError> {
    tracing::info!("/api/expectations/all called, resetting expectations");

    state
        .mockserver
        .reset()
        .await
        .map_err(ApiError::upstream("reset expectations"))?;

    Ok(Json(SuccessResponse { success: true }))
}
