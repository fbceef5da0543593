//! Ports module for Payment Query
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::PaymentQueryApi;
pub use outbound::{PaymentQueryPort, PaymentSummaryPort};
