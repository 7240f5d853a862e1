use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use super::types::ErrorResponse;
use crate::domain::DomainError;

/// An error on its way out of a handler, rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) | DomainError::InvalidRecord(_) | DomainError::InvalidJson(_) => {
            StatusCode::BAD_REQUEST
        }
        DomainError::FileNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::EmbeddingProvider(_) => StatusCode::BAD_GATEWAY,
        DomainError::VectorStore(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Io(_) | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self {
            status: status_for(&err),
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        DomainError::validation(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("Request failed with {}: {}", self.status, self.detail);
        } else {
            warn!("Request rejected with {}: {}", self.status, self.detail);
        }

        (
            self.status,
            Json(ErrorResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_record("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_json("x"), StatusCode::BAD_REQUEST),
            (DomainError::file_not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::embedding("x"), StatusCode::BAD_GATEWAY),
            (DomainError::vector_store("x"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn detail_carries_the_error_message() {
        let err = ApiError::from(DomainError::file_not_found("/tmp/missing.json"));
        assert_eq!(err.detail(), "JSON file not found: /tmp/missing.json");
    }
}
