//! # Error Types
//!
//! Defines error types shared across the ledger crates.

use thiserror::Error;

/// A status string did not match any known `PaymentStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown payment status: {0}")]
pub struct StatusParseError(pub String);
