use serde::{Deserialize, Serialize};

use crate::domain::{DependencyStatus, IngestReport, Match, RecordFailure};
use crate::{QueryOutcome, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadJsonRequest {
    pub json_file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadJsonResponse {
    pub message: String,
    pub total_objects: usize,
    pub collection_name: String,
    pub failed_objects: usize,
    pub failures: Vec<RecordFailure>,
}

impl From<IngestReport> for LoadJsonResponse {
    fn from(report: IngestReport) -> Self {
        Self {
            message: report.summary(),
            total_objects: report.loaded(),
            collection_name: report.collection_name().to_string(),
            failed_objects: report.failed(),
            failures: report.failures().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub threshold: Option<f32>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One match; `question` is the stored record exactly as it was ingested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub id: String,
    pub question: Record,
    pub score: f32,
}

impl From<Match> for QueryResult {
    fn from(m: Match) -> Self {
        Self {
            id: m.id().to_string(),
            score: m.score(),
            question: m.into_record(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub results: Vec<QueryResult>,
    pub total_results: usize,
    pub threshold: f32,
}

impl From<QueryOutcome> for QueryResponse {
    fn from(outcome: QueryOutcome) -> Self {
        let query = outcome.query().to_string();
        let threshold = outcome.threshold();
        let results: Vec<QueryResult> = outcome
            .into_matches()
            .into_iter()
            .map(QueryResult::from)
            .collect();

        Self {
            query,
            total_results: results.len(),
            results,
            threshold,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub vector_store: DependencyStatus,
    pub embedding_provider: DependencyStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub version: String,
    pub docs: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
