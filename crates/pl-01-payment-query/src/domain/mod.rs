//! # Domain Layer
//!
//! Pure query logic for the Payment Query subsystem.
//!
//! - `cursor`: opaque continuation token codec
//! - `query`: filter, port descriptors, page and result types
//! - `normalizer`: filter validation and canonicalization
//! - `errors`: query and port errors
//!
//! This module contains NO I/O dependencies. Storage is reached through the
//! traits in `ports`.

pub mod cursor;
pub mod errors;
pub mod normalizer;
pub mod query;

pub use cursor::*;
pub use errors::*;
pub use normalizer::normalize;
pub use query::*;
