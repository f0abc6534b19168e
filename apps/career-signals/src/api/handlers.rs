//! Route handlers.

use super::AppState;
use super::error::{ApiError, ApiResult};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use signals_core::{
    AnalysisRequest, AnalysisResult, Category, CourseCatalogue, CourseId, CourseRecord, Phase,
    analyze, field_weights_value, validate,
};
use tracing::{debug, info, warn};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub courses: usize,
    pub fields: usize,
}

/// Query parameters of `GET /courses`.
#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub phase: Option<i64>,
    pub category: Option<String>,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Career Signals API" }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        courses: state.catalogue.len(),
        fields: state.fields.len(),
    })
}

/// `GET /courses?phase=&category=`. Phase filtering is exact, not cumulative.
pub async fn list_courses(
    State(state): State<AppState>,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<CourseRecord>>> {
    let Query(query) = query?;

    let phase = query.phase.map(Phase::try_from).transpose()?;
    let category = query
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;

    let courses: Vec<CourseRecord> = state
        .catalogue
        .filter(phase, category)
        .into_iter()
        .cloned()
        .collect();
    debug!(?phase, ?category, count = courses.len(), "Listed courses");

    Ok(Json(courses))
}

pub async fn get_course(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> ApiResult<Json<CourseRecord>> {
    let Path(id) = id?;
    state
        .catalogue
        .get(CourseId(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))
}

pub async fn list_fields(State(state): State<AppState>) -> Json<Value> {
    Json(field_weights_value(&*state.fields))
}

/// `POST /analysis`: validate the request against the loaded catalogue, then
/// run the engine.
pub async fn run_analysis(
    State(state): State<AppState>,
    request: Result<Json<AnalysisRequest>, JsonRejection>,
) -> ApiResult<Json<AnalysisResult>> {
    let Json(request) = request?;

    let validated = validate(request, &*state.catalogue).inspect_err(|e| {
        warn!(error = %e, "Analysis request rejected");
    })?;

    let result = analyze(
        validated.phase,
        &validated.grades,
        &*state.catalogue,
        &*state.fields,
    );
    info!(
        phase = %result.phase,
        grades = validated.grades.len(),
        coverage = result.coverage,
        confidence = %result.confidence,
        warnings = result.warnings().len(),
        "Analysis complete"
    );

    Ok(Json(result))
}
