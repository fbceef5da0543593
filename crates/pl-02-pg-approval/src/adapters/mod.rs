//! # Adapters Layer
//!
//! PG client implementations, the request cipher and the HTTP transport.

pub mod cipher;
pub mod http;
pub mod mock_pg;
pub mod test_pg;

pub use cipher::PgCipher;
pub use http::ReqwestTransport;
pub use mock_pg::MockPgClient;
pub use test_pg::TestPgClient;
