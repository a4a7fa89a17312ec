//! HTTP client for the generation service.
//!
//! [`GenerationClient`] performs exactly one `POST` per prompt and never
//! retries; the user resubmits instead.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use pluginchat_sdk::{BackendConfig, GenerationClient, SdkError};
//!
//! # async fn run() -> Result<(), SdkError> {
//! let client = GenerationClient::new(BackendConfig::default())?;
//! match client.generate("Route ORU messages to a REST endpoint").await {
//!     Ok(result) => println!("{} file(s)", result.files.len()),
//!     Err(SdkError::Backend { status_text, .. }) => eprintln!("rejected: {status_text}"),
//!     Err(e) => eprintln!("unreachable: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

use pluginchat_models::{GenerationRequest, GenerationResult};
use reqwest::Url;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::error::SdkError;

/// A handle on the generation service.
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl GenerationClient {
    /// Build a client from the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self, SdkError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| SdkError::Config(format!("invalid endpoint {:?}: {e}", config.endpoint)))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// The endpoint every request is posted to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Submit a prompt and decode the service's answer.
    ///
    /// * non-2xx status → [`SdkError::Backend`] carrying the reason phrase
    /// * connection / timeout failure → [`SdkError::Http`]
    /// * undecodable body → [`SdkError::Serialization`]
    pub async fn generate(&self, prompt: &str) -> Result<GenerationResult, SdkError> {
        debug!(endpoint = %self.endpoint, "posting prompt");

        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&GenerationRequest::new(prompt))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map_or_else(|| status.as_u16().to_string(), str::to_string);
            // The body usually carries the service's own explanation; it is
            // logged but not surfaced.
            let detail = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %detail, "generation service rejected prompt");
            return Err(SdkError::Backend {
                status: status.as_u16(),
                status_text,
            });
        }

        let body = res.bytes().await?;
        let result: GenerationResult = serde_json::from_slice(&body)?;
        debug!(
            steps = result.steps.len(),
            files = result.files.len(),
            "generation result decoded"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    /// Serve `app` on an ephemeral local port and return its `/generate` URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/generate")
    }

    fn client_for(endpoint: &str) -> GenerationClient {
        GenerationClient::new(
            BackendConfig::default()
                .with_endpoint(endpoint)
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap()
    }

    #[test]
    fn invalid_endpoint_is_a_config_error() {
        let err = GenerationClient::new(BackendConfig::default().with_endpoint("not a url"))
            .unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[tokio::test]
    async fn posts_prompt_and_decodes_result() {
        let app = Router::new().route(
            "/generate",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "steps": [format!("got {}", body["prompt"].as_str().unwrap_or_default())],
                    "files": [{ "path": "x.xml", "size_bytes": 120 }],
                }))
            }),
        );
        let client = client_for(&serve(app).await);

        let result = client.generate("hello").await.unwrap();
        assert_eq!(result.steps, vec!["got hello".to_string()]);
        assert_eq!(result.files[0].size_bytes, 120);
        assert!(result.msg.is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_a_backend_rejection() {
        let app = Router::new().route(
            "/generate",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "metadata parsing failed" })),
                )
            }),
        );
        let client = client_for(&serve(app).await);

        match client.generate("hello").await {
            Err(SdkError::Backend {
                status,
                status_text,
            }) => {
                assert_eq!(status, 500);
                assert_eq!(status_text, "Internal Server Error");
            }
            other => panic!("expected backend rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_serialization_error() {
        let app = Router::new().route("/generate", post(|| async { "<html>oops</html>" }));
        let client = client_for(&serve(app).await);

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, SdkError::Serialization(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_an_http_error() {
        // Bind then drop to obtain a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{addr}/generate"));
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, SdkError::Http(_)));
        assert!(!err.is_backend_rejection());
    }
}
