use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::error::ApiError;
use super::types::{
    HealthResponse, LoadJsonRequest, LoadJsonResponse, QueryRequest, QueryResponse,
    ServiceInfoResponse,
};
use crate::connector::api::Container;
use crate::domain::SearchQuery;

/// GET / - Service banner
pub async fn root() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: "PreMed RAG API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "POST /api/v1/load-json, POST /api/v1/query, GET /api/v1/health".to_string(),
    })
}

/// POST /api/v1/load-json
pub async fn load_json(
    State(container): State<Arc<Container>>,
    payload: Result<Json<LoadJsonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LoadJsonResponse>), ApiError> {
    let Json(request) = payload?;

    let report = container
        .load_use_case()
        .execute(&request.json_file_path)
        .await?;

    Ok((StatusCode::CREATED, Json(report.into())))
}

/// POST /api/v1/query
pub async fn query(
    State(container): State<Arc<Container>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = payload?;
    let config = container.config();

    let search_query = SearchQuery::new(request.query)
        .with_threshold(request.threshold.unwrap_or(config.similarity_threshold))
        .with_limit(request.limit.unwrap_or(config.default_limit));

    let outcome = container.query_use_case().execute(search_query).await?;

    Ok(Json(outcome.into()))
}

/// GET /api/v1/health
pub async fn health(State(container): State<Arc<Container>>) -> (StatusCode, Json<HealthResponse>) {
    let report = container.health_use_case().execute().await;

    let (status, label) = if report.is_healthy() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            vector_store: report.vector_store,
            embedding_provider: report.embedding_provider,
        }),
    )
}
