//! # Domain Layer
//!
//! Approval request/result types and errors. No I/O.

pub mod entities;
pub mod errors;

pub use entities::{PgApproveRequest, PgApproveResult};
pub use errors::PgError;
