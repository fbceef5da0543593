//! # PL-01: Payment Query Subsystem
//!
//! Cursor-paginated, filtered reads over the payment ledger, paired with an
//! aggregate summary over the same filter.
//!
//! ## Architecture
//!
//! - **Domain**: Cursor codec, query normalizer, filter/page/summary descriptors
//! - **Ports**: Inbound (PaymentQueryApi) and Outbound (PaymentQueryPort, PaymentSummaryPort)
//! - **Application**: Service orchestration (normalize, fan out, assemble)
//! - **Adapters**: In-memory store and JSON API handler
//!
//! ## Pagination
//!
//! Pages are ordered by `(approved_at DESC, id DESC)`. The opaque
//! `next_cursor` returned with a page resumes strictly after its last item.
//! A malformed cursor restarts from the first page rather than failing.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{
    handle_api_query, ApiGatewayHandler, ApiQueryError, InMemoryPaymentStore, PaymentsQueryParams,
};
pub use application::QueryPaymentsService;
pub use config::QueryConfig;
pub use domain::*;
pub use ports::inbound::PaymentQueryApi;
pub use ports::outbound::{PaymentQueryPort, PaymentSummaryPort};
