//! Application layer - provider routing

pub mod router;

pub use router::PgClientRouter;
