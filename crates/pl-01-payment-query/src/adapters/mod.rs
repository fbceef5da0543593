//! # Adapters Layer
//!
//! Secondary adapters for the Payment Query subsystem.

pub mod api_handler;
pub mod memory;

pub use api_handler::{handle_api_query, ApiGatewayHandler, ApiQueryError, PaymentsQueryParams};
pub use memory::InMemoryPaymentStore;
