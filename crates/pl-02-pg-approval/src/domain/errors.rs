//! Error types for PG approval

use shared_types::PartnerId;
use thiserror::Error;

/// Errors raised by PG clients and the provider router.
#[derive(Debug, Error)]
pub enum PgError {
    /// Configured key or IV is unusable
    #[error("Invalid PG configuration: {0}")]
    InvalidConfig(String),

    /// Request cannot be expressed in the provider's format
    #[error("Invalid approval request: {0}")]
    InvalidRequest(String),

    /// Payload encryption failed
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Network-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("PG responded with HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Provider answer could not be interpreted
    #[error("Invalid PG response: {0}")]
    InvalidResponse(String),

    /// Any failure during approval, wrapped once at the client boundary
    #[error("PG approval failed for partner {partner_id}: {source}")]
    ApprovalFailed {
        partner_id: PartnerId,
        #[source]
        source: Box<PgError>,
    },

    /// No registered client handles this partner
    #[error("No PG client supports partner {0}")]
    NoProvider(PartnerId),
}
