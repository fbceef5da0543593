//! Approval request and result exchanged with PG clients.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{PartnerId, PaymentStatus};

/// Card approval request handed to a PG client.
///
/// Only the card BIN and last four digits travel through the ledger; PG
/// clients supply whatever else their provider requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgApproveRequest {
    pub partner_id: PartnerId,
    pub amount: Decimal,
    pub card_bin: Option<String>,
    pub card_last4: Option<String>,
    pub product_name: Option<String>,
}

impl PgApproveRequest {
    pub fn new(partner_id: PartnerId, amount: Decimal) -> Self {
        Self {
            partner_id,
            amount,
            card_bin: None,
            card_last4: None,
            product_name: None,
        }
    }

    pub fn with_card(mut self, bin: impl Into<String>, last4: impl Into<String>) -> Self {
        self.card_bin = Some(bin.into());
        self.card_last4 = Some(last4.into());
        self
    }

    pub fn with_product(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }
}

/// Outcome reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgApproveResult {
    pub approval_code: String,
    /// Provider-local approval time (no offset on the wire).
    pub approved_at: NaiveDateTime,
    pub status: PaymentStatus,
}
