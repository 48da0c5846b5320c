use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Query, Request, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::service::InsightService;
use super::views::{
    CourseRecommendationReport, CourseRecommendationRequest, LiveIntelligenceQuery,
    LiveIntelligenceReport, PathwayRequest, SkillComparisonReport, SkillComparisonRequest,
    SourceStatus,
};
use crate::analysis::Pathway;
use crate::dataset::DatasetSummary;
use crate::error::AppError;

/// JSON request body decoded regardless of the `Content-Type` header.
pub(crate) struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| {
                (
                    rejection.status(),
                    Json(json!({ "error": rejection.body_text() })),
                )
            })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|error| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("invalid JSON body: {error}") })),
                )
            })
    }
}

/// Router builder exposing the dashboard, comparison, and recommendation endpoints.
pub fn insights_router(service: Arc<InsightService>) -> Router {
    Router::new()
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/live_intelligence", get(live_intelligence_handler))
        .route("/api/skill_comparison", post(skill_comparison_handler))
        .route("/api/recommend_courses", post(recommend_courses_handler))
        .route("/api/upskilling_pathway", post(upskilling_pathway_handler))
        .route("/api/debug_env", get(debug_env_handler))
        .with_state(service)
}

pub(crate) async fn dashboard_handler(
    State(service): State<Arc<InsightService>>,
) -> Result<Json<DatasetSummary>, AppError> {
    Ok(Json(service.dashboard()?))
}

pub(crate) async fn live_intelligence_handler(
    State(service): State<Arc<InsightService>>,
    Query(query): Query<LiveIntelligenceQuery>,
) -> Json<LiveIntelligenceReport> {
    Json(service.live_intelligence(&query.title, &query.loc).await)
}

pub(crate) async fn skill_comparison_handler(
    State(service): State<Arc<InsightService>>,
    JsonBody(request): JsonBody<SkillComparisonRequest>,
) -> Json<SkillComparisonReport> {
    Json(
        service
            .skill_comparison(&request.resume, &request.title, &request.loc)
            .await,
    )
}

pub(crate) async fn recommend_courses_handler(
    State(service): State<Arc<InsightService>>,
    JsonBody(request): JsonBody<CourseRecommendationRequest>,
) -> Json<CourseRecommendationReport> {
    Json(
        service
            .recommend_courses(&request.resume, &request.missing)
            .await,
    )
}

pub(crate) async fn upskilling_pathway_handler(
    State(service): State<Arc<InsightService>>,
    JsonBody(request): JsonBody<PathwayRequest>,
) -> Json<Pathway> {
    Json(service.upskilling_pathway(&request.missing).await)
}

pub(crate) async fn debug_env_handler(
    State(service): State<Arc<InsightService>>,
) -> Json<SourceStatus> {
    Json(service.source_status())
}
