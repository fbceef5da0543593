//! Outbound Ports (Driven Ports / SPI)
//!
//! Implemented by storage adapters. Both ports must apply the same predicate
//! semantics (`from` inclusive, `to` exclusive) and the page port must honour
//! the `(approved_at DESC, id DESC)` ordering used by the cursor codec.

use crate::domain::errors::PortError;
use crate::domain::query::{Page, PageQuery, SummaryFilter, SummaryProjection};
use async_trait::async_trait;

/// Keyset page reader
#[async_trait]
pub trait PaymentQueryPort: Send + Sync {
    /// Return up to `query.limit` matching payments strictly after
    /// `query.after`, newest first.
    ///
    /// `has_next` reports whether more matching rows exist beyond the page;
    /// `next_key` is the position to resume from.
    ///
    /// Ordering is by [`CursorKey`](crate::domain::cursor::CursorKey), whose
    /// timestamp has millisecond resolution: rows approved within the same
    /// millisecond are ordered by id. Stores keeping finer timestamps must
    /// order on the truncated value.
    async fn find_page(&self, query: &PageQuery) -> Result<Page, PortError>;
}

/// Aggregate reader
#[async_trait]
pub trait PaymentSummaryPort: Send + Sync {
    /// Count and sum every payment matching the filter.
    async fn summarize(&self, filter: &SummaryFilter) -> Result<SummaryProjection, PortError>;
}

/// Mock implementations for testing
#[cfg(test)]
pub mod mocks {
    use super::*;
    use parking_lot::Mutex;

    /// Page port returning a canned result and recording every request.
    pub struct RecordingPagePort {
        response: Result<Page, PortError>,
        pub calls: Mutex<Vec<PageQuery>>,
    }

    impl RecordingPagePort {
        pub fn returning(page: Page) -> Self {
            Self {
                response: Ok(page),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(err: PortError) -> Self {
            Self {
                response: Err(err),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PaymentQueryPort for RecordingPagePort {
        async fn find_page(&self, query: &PageQuery) -> Result<Page, PortError> {
            self.calls.lock().push(query.clone());
            self.response.clone()
        }
    }

    /// Summary port returning a canned projection and recording every request.
    pub struct RecordingSummaryPort {
        response: Result<SummaryProjection, PortError>,
        pub calls: Mutex<Vec<SummaryFilter>>,
    }

    impl RecordingSummaryPort {
        pub fn returning(summary: SummaryProjection) -> Self {
            Self {
                response: Ok(summary),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(err: PortError) -> Self {
            Self {
                response: Err(err),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PaymentSummaryPort for RecordingSummaryPort {
        async fn summarize(&self, filter: &SummaryFilter) -> Result<SummaryProjection, PortError> {
            self.calls.lock().push(filter.clone());
            self.response.clone()
        }
    }
}
