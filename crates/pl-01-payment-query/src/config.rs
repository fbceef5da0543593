//! Configuration for the Payment Query subsystem

use serde::{Deserialize, Serialize};
use std::env;

/// Page size bounds enforced by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size used when the caller omits `limit`
    pub default_limit: u32,
    /// Hard upper bound on page size
    pub max_limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl QueryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LEDGER_QUERY_DEFAULT_LIMIT`: Default page size (default: 20)
    /// - `LEDGER_QUERY_MAX_LIMIT`: Maximum page size (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            default_limit: env::var("LEDGER_QUERY_DEFAULT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_limit),

            max_limit: env::var("LEDGER_QUERY_MAX_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_limit),
        }
    }

    /// Upper bound, never below 1.
    pub fn effective_max(&self) -> u32 {
        self.max_limit.max(1)
    }

    /// Default page size clamped into `[1, effective_max]`.
    pub fn effective_default(&self) -> u32 {
        self.default_limit.clamp(1, self.effective_max())
    }

    /// Clamp a caller-supplied limit into `[1, effective_max]`.
    pub fn clamp_limit(&self, requested: Option<i64>) -> u32 {
        match requested {
            None => self.effective_default(),
            Some(limit) => {
                let max = i64::from(self.effective_max());
                // bounded by max, so the cast cannot truncate
                limit.clamp(1, max) as u32
            }
        }
    }
}
