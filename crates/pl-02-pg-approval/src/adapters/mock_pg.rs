//! Local mock PG. Handles odd partner ids and approves without any I/O.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shared_types::{PartnerId, PaymentStatus};
use tracing::debug;

use crate::domain::{PgApproveRequest, PgApproveResult, PgError};
use crate::ports::PgClientPort;

/// In-process PG that approves every positive amount.
///
/// Approval codes are sequential per instance (`MOCK-00000001`, ...).
#[derive(Debug, Default)]
pub struct MockPgClient {
    sequence: AtomicU64,
}

impl MockPgClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of approvals issued so far.
    pub fn issued(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PgClientPort for MockPgClient {
    fn name(&self) -> &'static str {
        "mock-pg"
    }

    fn supports(&self, partner_id: PartnerId) -> bool {
        partner_id % 2 != 0
    }

    async fn approve(&self, request: &PgApproveRequest) -> Result<PgApproveResult, PgError> {
        if request.amount <= Decimal::ZERO {
            return Err(PgError::InvalidRequest(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }

        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("[pl-02] Mock approval #{} for partner {}", seq, request.partner_id);

        Ok(PgApproveResult {
            approval_code: format!("MOCK-{:08}", seq),
            approved_at: Utc::now().naive_utc(),
            status: PaymentStatus::Approved,
        })
    }
}
