//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::QueryError;
use crate::domain::query::{QueryFilter, QueryResult};
use async_trait::async_trait;

/// Primary Payment Query API
#[async_trait]
pub trait PaymentQueryApi: Send + Sync {
    /// Run a filtered, paginated, aggregated read.
    ///
    /// This is the single entry point. It:
    /// 1. Normalizes the filter
    /// 2. Issues the page query and the summary query concurrently
    /// 3. Encodes the continuation cursor
    /// 4. Returns items, summary, `has_next` and `next_cursor`
    async fn query(&self, filter: QueryFilter) -> Result<QueryResult, QueryError>;
}
