//! Inbound Ports (Driving Ports / API)

use crate::domain::{PgApproveRequest, PgApproveResult, PgError};
use async_trait::async_trait;
use shared_types::PartnerId;

/// A payment gateway able to approve card payments for some partners.
#[async_trait]
pub trait PgClientPort: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this client handles the given partner.
    fn supports(&self, partner_id: PartnerId) -> bool;

    /// Request approval from the provider.
    async fn approve(&self, request: &PgApproveRequest) -> Result<PgApproveResult, PgError>;
}
