//! # PL-02: PG Approval Subsystem
//!
//! Card approval through external payment gateways (PGs).
//!
//! ## Architecture
//!
//! - **Domain**: Approval request/result, PgError
//! - **Ports**: Inbound (PgClientPort) and Outbound (PgTransport)
//! - **Application**: PgClientRouter (partner → provider selection)
//! - **Adapters**: TestPgClient (AES-256-GCM over HTTP), MockPgClient, ReqwestTransport
//!
//! ## Routing
//!
//! Even partner ids go to the test PG, odd ones to the local mock:
//!
//! ```ignore
//! let transport = Arc::new(ReqwestTransport::new(&config)?);
//! let router = PgClientRouter::new()
//!     .register(Arc::new(TestPgClient::new(config, transport)?))
//!     .register(Arc::new(MockPgClient::new()));
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{MockPgClient, PgCipher, ReqwestTransport, TestPgClient};
pub use application::PgClientRouter;
pub use config::PgClientConfig;
pub use domain::{PgApproveRequest, PgApproveResult, PgError};
pub use ports::{PgClientPort, PgTransport};

use std::sync::Arc;

/// Router with the standard provider set: test PG first, mock as fallback.
pub fn default_router(config: PgClientConfig) -> Result<PgClientRouter, PgError> {
    let transport = Arc::new(ReqwestTransport::new(&config)?);
    Ok(PgClientRouter::new()
        .register(Arc::new(TestPgClient::new(config, transport)?))
        .register(Arc::new(MockPgClient::new())))
}
