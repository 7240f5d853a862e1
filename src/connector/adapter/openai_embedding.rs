use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::EmbeddingService;
use crate::domain::{known_dimensions, DomainError, EmbeddingConfig};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "text-embedding-3-large";
const EMBEDDINGS_PATH: &str = "/embeddings";
const MODELS_PATH: &str = "/models";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

/// HTTP client for the OpenAI embeddings API (and compatible endpoints).
///
/// Every successful `embed`/`embed_batch` call is billed by the provider.
/// `health_check` only lists models, which is free.
pub struct OpenAiEmbedding {
    client: reqwest::Client,
    api_key: String,
    config: EmbeddingConfig,
    /// Sent as `dimensions` when the configured size differs from the model's native size.
    requested_dimensions: Option<usize>,
    embeddings_url: String,
    models_url: String,
    timeout: Duration,
}

impl OpenAiEmbedding {
    pub fn new(
        api_key: impl Into<String>,
        config: EmbeddingConfig,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        let trimmed = base.trim_end_matches('/');

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("Failed to build HTTP client: {e}")))?;

        let requested_dimensions = match known_dimensions(config.model_name()) {
            Some(native) if native != config.dimensions() => Some(config.dimensions()),
            _ => None,
        };

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
            requested_dimensions,
            embeddings_url: format!("{trimmed}{EMBEDDINGS_PATH}"),
            models_url: format!("{trimmed}{MODELS_PATH}"),
            timeout,
        })
    }

    fn request_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::embedding(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else {
            DomainError::embedding(format!("request failed: {e}"))
        }
    }
}

#[async_trait]
impl EmbeddingService for OpenAiEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| DomainError::embedding("empty response from embedding API"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(DomainError::embedding("cannot embed empty text"));
        }

        let request = EmbeddingRequest {
            model: self.config.model_name(),
            input: texts,
            dimensions: self.requested_dimensions,
        };

        let response = self
            .client
            .post(&self.embeddings_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiEmbedding: API returned {status}: {body}");
            return Err(DomainError::embedding(format!(
                "API returned {status}: {body}"
            )));
        }

        let mut data = response
            .json::<EmbeddingResponse>()
            .await
            .map_err(|e| DomainError::embedding(format!("failed to parse response: {e}")))?
            .data;

        if data.len() != texts.len() {
            return Err(DomainError::embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                data.len()
            )));
        }

        data.sort_by_key(|d| d.index);

        let expected = self.config.dimensions();
        if let Some(bad) = data.iter().find(|d| d.embedding.len() != expected) {
            return Err(DomainError::embedding(format!(
                "expected {} dimensions, got {}",
                expected,
                bad.embedding.len()
            )));
        }

        debug!(
            "Generated {} embeddings with {}",
            data.len(),
            self.config.model_name()
        );

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        let response = self
            .client
            .get(&self.models_url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DomainError::embedding(format!(
                "API returned {}",
                response.status()
            )))
        }
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn make_response(count: usize, dim: usize) -> serde_json::Value {
        // Reverse the order so the client has to sort by index.
        let data: Vec<serde_json::Value> = (0..count)
            .rev()
            .map(|i| {
                serde_json::json!({
                    "object": "embedding",
                    "index": i,
                    "embedding": vec![i as f32; dim],
                })
            })
            .collect();
        serde_json::json!({
            "object": "list",
            "data": data,
            "model": "text-embedding-3-small",
            "usage": { "prompt_tokens": 8, "total_tokens": 8 },
        })
    }

    async fn mount_ok(server: &MockServer, count: usize, dim: usize) {
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(make_response(count, dim)))
            .mount(server)
            .await;
    }

    fn embedder(server: &MockServer, dim: usize) -> OpenAiEmbedding {
        OpenAiEmbedding::new(
            "sk-test",
            EmbeddingConfig::new("test-model", dim),
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn embed_returns_vector_of_configured_length() {
        let server = MockServer::start().await;
        mount_ok(&server, 1, 4).await;

        let vector = embedder(&server, 4).embed("What is DNA?").await.unwrap();
        assert_eq!(vector.len(), 4);
    }

    #[tokio::test]
    async fn embed_sends_bearer_token_and_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "input": ["hello"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(make_response(1, 2)))
            .expect(1)
            .mount(&server)
            .await;

        embedder(&server, 2).embed("hello").await.unwrap();
    }

    #[tokio::test]
    async fn embed_batch_orders_by_index() {
        let server = MockServer::start().await;
        mount_ok(&server, 3, 2).await;

        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let vectors = embedder(&server, 2).embed_batch(&texts).await.unwrap();

        assert_eq!(vectors, vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]]);
    }

    #[tokio::test]
    async fn empty_text_fails_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = embedder(&server, 2).embed("   ").await.unwrap_err();
        assert!(err.is_embedding_error());
    }

    #[tokio::test]
    async fn api_error_maps_to_embedding_variant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {
                    "message": "Incorrect API key provided.",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key",
                }
            })))
            .mount(&server)
            .await;

        let err = embedder(&server, 2).embed("test").await.unwrap_err();
        assert!(err.is_embedding_error());
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn wrong_dimension_is_rejected() {
        let server = MockServer::start().await;
        mount_ok(&server, 1, 3).await;

        let err = embedder(&server, 4).embed("test").await.unwrap_err();
        assert!(err.is_embedding_error());
    }

    #[tokio::test]
    async fn missing_embeddings_are_rejected() {
        let server = MockServer::start().await;
        mount_ok(&server, 0, 2).await;

        let err = embedder(&server, 2).embed("test").await.unwrap_err();
        assert!(err.is_embedding_error());
    }

    #[tokio::test]
    async fn unreachable_server_is_an_embedding_error() {
        let embedding = OpenAiEmbedding::new(
            "sk-test",
            EmbeddingConfig::new("test-model", 2),
            "http://127.0.0.1:9",
            Duration::from_secs(2),
        )
        .unwrap();

        let err = embedding.embed("test").await.unwrap_err();
        assert!(err.is_embedding_error());
    }

    #[tokio::test]
    async fn health_check_lists_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "data": []
            })))
            .mount(&server)
            .await;

        assert!(embedder(&server, 2).health_check().await.is_ok());
    }

    #[tokio::test]
    async fn health_check_fails_on_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert!(embedder(&server, 2).health_check().await.is_err());
    }

    #[test]
    fn native_dimensions_are_not_sent() {
        let embedding = OpenAiEmbedding::new(
            "k",
            EmbeddingConfig::for_model(DEFAULT_MODEL),
            DEFAULT_BASE_URL,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(embedding.requested_dimensions, None);

        let shortened = OpenAiEmbedding::new(
            "k",
            EmbeddingConfig::for_model(DEFAULT_MODEL).with_dimensions(256),
            DEFAULT_BASE_URL,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(shortened.requested_dimensions, Some(256));
    }
}
