//! HTTP transport for remote PG clients.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::PgClientConfig;
use crate::domain::PgError;
use crate::ports::PgTransport;

/// Header carrying the provider API key.
pub const API_KEY_HEADER: &str = "API-KEY";

/// [`PgTransport`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the configured timeouts.
    pub fn new(config: &PgClientConfig) -> Result<Self, PgError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| PgError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PgTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, PgError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    PgError::Transport(format!("Cannot connect to {}", url))
                } else if e.is_timeout() {
                    PgError::Transport(format!("Timed out calling {}", url))
                } else {
                    PgError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PgError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PgError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_default_config() {
        assert!(ReqwestTransport::new(&PgClientConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = PgClientConfig {
            connect_timeout_secs: 1,
            request_timeout_secs: 1,
            ..PgClientConfig::default()
        };
        let transport = ReqwestTransport::new(&config).unwrap();

        // Port 9 on loopback (discard) is not expected to accept HTTP
        let result = transport
            .post_json("http://127.0.0.1:9/api", "key", &serde_json::json!({}))
            .await;

        assert!(matches!(result, Err(PgError::Transport(_))));
    }
}
