//! Configuration for the test PG client

use serde::{Deserialize, Serialize};
use std::env;

/// Default test PG endpoint.
pub const DEFAULT_API_URL: &str = "https://api-test-pg.bigs.im";
/// Public sandbox API key.
pub const DEFAULT_API_KEY: &str = "11111111-1111-4111-8111-111111111111";
/// URL-safe base64 of twelve zero bytes.
pub const DEFAULT_IV: &str = "AAAAAAAAAAAAAAAA";

/// Connection settings for the test PG.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgClientConfig {
    /// Base URL, without the `/api/v1/...` path
    pub api_url: String,
    /// API key sent as `API-KEY` and hashed into the AES key
    pub api_key: String,
    /// URL-safe base64 encoded 12-byte GCM nonce
    pub iv: String,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PgClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            iv: DEFAULT_IV.to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 3,
        }
    }
}

impl PgClientConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PG_TEST_API_URL`: Base URL (default: https://api-test-pg.bigs.im)
    /// - `PG_TEST_API_KEY`: API key (default: public sandbox key)
    /// - `PG_TEST_IV`: Base64URL IV (default: AAAAAAAAAAAAAAAA)
    /// - `PG_TEST_TIMEOUT_SECS`: Request timeout (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: env::var("PG_TEST_API_URL").unwrap_or(defaults.api_url),
            api_key: env::var("PG_TEST_API_KEY").unwrap_or(defaults.api_key),
            iv: env::var("PG_TEST_IV").unwrap_or(defaults.iv),
            request_timeout_secs: env::var("PG_TEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            connect_timeout_secs: defaults.connect_timeout_secs,
        }
    }

    /// Full URL of the credit-card approval endpoint.
    pub fn approval_url(&self) -> String {
        format!("{}/api/v1/pay/credit-card", self.api_url.trim_end_matches('/'))
    }
}
