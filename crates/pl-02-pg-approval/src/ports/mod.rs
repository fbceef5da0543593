//! Ports module for PG approval
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::PgClientPort;
pub use outbound::PgTransport;
