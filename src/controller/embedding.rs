//! HTTP client for the external embedding service.
//!
//! One POST per summarize: `{"folder_path": ...}` in, `{"embedding": [...]}`
//! out. Extra response fields are ignored; a missing or non-numeric
//! `embedding` is a decode error.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use super::errors::ServiceError;
use crate::config::ServiceConfig;

/// Request body sent to the service.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    folder_path: &'a str,
}

/// Validated response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbedResponse {
    pub embedding: Vec<f64>,
}

/// Client for the embedding endpoint.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    http: HttpClient,
    endpoint: String,
}

impl EmbeddingClient {
    /// Build a client from service settings.
    ///
    /// Without `request_timeout_secs` the call waits as long as the service
    /// takes.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        Self::with_timeout(&config.endpoint, config.request_timeout())
    }

    pub fn with_timeout(endpoint: &str, timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ServiceError::Unreachable {
            endpoint: endpoint.to_string(),
            reason: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request an embedding for `folder_path`.
    pub async fn embed(&self, folder_path: &str) -> Result<EmbedResponse, ServiceError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&EmbedRequest { folder_path })
            .send()
            .await
            .map_err(|e| ServiceError::Unreachable {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                status_text,
            });
        }

        let body = response.bytes().await.map_err(|e| ServiceError::Unreachable {
            endpoint: self.endpoint.clone(),
            reason: format!("failed to read response body: {e}"),
        })?;

        serde_json::from_slice(&body).map_err(|e| ServiceError::Decode {
            reason: e.to_string(),
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> EmbeddingClient {
        EmbeddingClient::with_timeout(&format!("{}/embed", server.uri()), None).unwrap()
    }

    #[tokio::test]
    async fn test_embed_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embed"))
            .and(body_json(serde_json::json!({"folder_path": "/a/b"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"embedding": [0.1, 0.2, 0.3], "model": "x"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).embed("/a/b").await.unwrap();
        assert_eq!(response.embedding, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_embed_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
            .mount(&server)
            .await;

        let err = client_for(&server).embed("/a").await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "Python service error: Service Unavailable");
    }

    #[tokio::test]
    async fn test_embed_unregistered_status_has_empty_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(599))
            .mount(&server)
            .await;

        let err = client_for(&server).embed("/a").await.unwrap_err();
        assert_eq!(err.status(), Some(599));
        assert_eq!(err.to_string(), "Python service error: ");
    }

    #[tokio::test]
    async fn test_embed_missing_field_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"vector": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).embed("/a").await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_embed_non_numeric_embedding_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"embedding": "nope"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).embed("/a").await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_embed_unreachable() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let client = EmbeddingClient::with_timeout(
            "http://127.0.0.1:9/embed",
            Some(Duration::from_secs(2)),
        )
        .unwrap();
        let err = client.embed("/a").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unreachable { .. }));
    }

    #[test]
    fn test_from_config_uses_endpoint() {
        let client = EmbeddingClient::from_config(&ServiceConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/embed");
    }
}
