//! # Core Domain Entities
//!
//! Defines the ledger entities shared by the query engine and the PG client.
//!
//! ## Clusters
//!
//! - **Identity**: `PartnerId`, `PaymentId`
//! - **Ledger**: `Payment`, `PaymentStatus`

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::StatusParseError;

/// Identifier of a merchant partner.
pub type PartnerId = i64;

/// Storage-assigned payment identifier. Unique and immutable once assigned.
pub type PaymentId = i64;

/// Lifecycle status of a payment as recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Approved by the payment gateway.
    Approved,
    /// Rejected or errored at the gateway.
    Failed,
    /// Cancelled after approval.
    Cancelled,
}

impl PaymentStatus {
    /// All known statuses, in wire order.
    pub const ALL: [PaymentStatus; 3] = [Self::Approved, Self::Failed, Self::Cancelled];

    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = StatusParseError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| StatusParseError(trimmed.to_string()))
    }
}

/// A settled payment row.
///
/// Owned by the storage layer; readers treat it as immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique payment id (tie-break key for ordering).
    pub id: PaymentId,
    /// Owning partner.
    pub partner_id: PartnerId,
    /// Gross amount charged to the card.
    pub amount: Decimal,
    /// Fee rate applied at approval time (e.g. `0.0300`).
    pub applied_fee_rate: Decimal,
    /// Fee withheld from the gross amount.
    pub fee_amount: Decimal,
    /// Amount settled to the partner (`amount - fee_amount`).
    pub net_amount: Decimal,
    /// First six digits of the card number.
    pub card_bin: Option<String>,
    /// Last four digits of the card number.
    pub card_last4: Option<String>,
    /// Approval code issued by the gateway.
    pub approval_code: String,
    /// Approval instant (primary ordering key).
    pub approved_at: DateTime<Utc>,
    /// Current status.
    pub status: PaymentStatus,
}
