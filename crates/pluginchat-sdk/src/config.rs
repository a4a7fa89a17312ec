//! Generation service configuration.

use std::time::Duration;

/// Default endpoint of the local generation service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/generate";

/// Default request timeout, in seconds. Generation is slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Where and how to reach the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Full URL of the `POST /generate` endpoint.
    pub endpoint: String,
    /// Upper bound on a single request, connection included.
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                  | Default                          |
    /// |---------------------------|----------------------------------|
    /// | `PLUGINCHAT_BACKEND_URL`  | `http://127.0.0.1:8000/generate` |
    /// | `PLUGINCHAT_TIMEOUT_SECS` | `120`                            |
    ///
    /// Unparseable timeouts fall back to the default.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("PLUGINCHAT_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout_secs = std::env::var("PLUGINCHAT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Replace the endpoint, keeping the timeout.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let cfg = BackendConfig::default();
        assert_eq!(cfg.endpoint, "http://127.0.0.1:8000/generate");
        assert_eq!(cfg.timeout, Duration::from_secs(120));
    }

    #[test]
    fn builders_override_fields() {
        let cfg = BackendConfig::default()
            .with_endpoint("http://localhost:9999/generate")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(cfg.endpoint, "http://localhost:9999/generate");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }
}
