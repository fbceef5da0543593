//! Error types for Payment Query
//!
//! Validation failures are reported before any port is invoked; port failures
//! collapse into a single `QueryFailed` kind.

use thiserror::Error;

/// All errors surfaced by the query service.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Partner id must be a positive integer
    #[error("Invalid partner id: {0}")]
    InvalidPartnerId(i64),

    /// Status filter did not match any known status
    #[error("Unknown status filter: {0}")]
    InvalidStatus(String),

    /// `from` is later than `to`
    #[error("Invalid time range: from {from} is after to {to}")]
    InvalidTimeRange { from: String, to: String },

    /// Page or summary sub-query failed
    #[error("Query failed: {0}")]
    QueryFailed(#[from] PortError),
}

impl QueryError {
    /// Whether the caller supplied a bad filter (as opposed to a downstream fault).
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::QueryFailed(_))
    }
}

/// Failures raised by outbound port implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout during {operation}")]
    Timeout { operation: String },

    /// An aggregate no longer fits its numeric type
    #[error("Summary overflow in {0}")]
    Overflow(&'static str),
}
