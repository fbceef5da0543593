//! # Shared Types Crate
//!
//! Ledger entities shared by the query engine (`pl-01`) and the PG approval
//! client (`pl-02`).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Payment` and `PaymentStatus` are defined
//!   once here and never redefined by subsystems.
//! - **Read-only rows**: subsystems receive `Payment` values by value or by
//!   reference and never mutate them.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
