//! Outbound Ports (Driven Ports / SPI)

use crate::domain::PgError;
use async_trait::async_trait;

/// JSON-over-HTTP transport used by remote PG clients.
#[async_trait]
pub trait PgTransport: Send + Sync {
    /// POST `body` to `url` with the provider's `API-KEY` header and return
    /// the decoded JSON response. Non-2xx answers map to [`PgError::Http`].
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, PgError>;
}
