//! Payment Query Service
//!
//! Main service implementing PaymentQueryApi.

use std::sync::Arc;

use crate::config::QueryConfig;
use crate::domain::cursor::encode_cursor;
use crate::domain::errors::QueryError;
use crate::domain::normalizer::normalize;
use crate::domain::query::{Page, QueryFilter, QueryResult};
use crate::ports::inbound::PaymentQueryApi;
use crate::ports::outbound::{PaymentQueryPort, PaymentSummaryPort};
use async_trait::async_trait;

use tracing::{debug, info, warn};

/// Payment Query Service
///
/// Orchestrates the read pipeline:
/// 1. Normalize the filter (fail fast on bad input)
/// 2. Dispatch page and summary sub-queries concurrently
/// 3. Encode the continuation cursor
/// 4. Assemble the result
///
/// Stateless: a single instance can serve any number of concurrent calls.
pub struct QueryPaymentsService {
    config: QueryConfig,
    pages: Arc<dyn PaymentQueryPort>,
    summaries: Arc<dyn PaymentSummaryPort>,
}

impl QueryPaymentsService {
    /// Create a new service with default config
    pub fn new(pages: Arc<dyn PaymentQueryPort>, summaries: Arc<dyn PaymentSummaryPort>) -> Self {
        Self::with_config(QueryConfig::default(), pages, summaries)
    }

    /// Create a new service with custom config
    pub fn with_config(
        config: QueryConfig,
        pages: Arc<dyn PaymentQueryPort>,
        summaries: Arc<dyn PaymentSummaryPort>,
    ) -> Self {
        Self {
            config,
            pages,
            summaries,
        }
    }

    /// Create a service backed by one store serving both ports
    pub fn from_store<S>(config: QueryConfig, store: Arc<S>) -> Self
    where
        S: PaymentQueryPort + PaymentSummaryPort + 'static,
    {
        Self::with_config(config, store.clone(), store)
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Cursor for the next page, present only when the port reports more rows
    /// and supplies a position to resume from.
    fn next_cursor(page: &Page) -> Option<String> {
        match (page.has_next, page.next_key) {
            (true, Some(key)) => Some(encode_cursor(&key)),
            _ => None,
        }
    }
}

#[async_trait]
impl PaymentQueryApi for QueryPaymentsService {
    async fn query(&self, filter: QueryFilter) -> Result<QueryResult, QueryError> {
        // 1. Normalize
        let normalized = normalize(&filter, &self.config)?;
        let page_query = normalized.page_query();
        let summary_filter = normalized.summary_filter();

        debug!(
            partner_id = normalized.partner_id,
            status = ?normalized.status,
            resumed = page_query.after.is_some(),
            limit = page_query.limit,
            "Dispatching page and summary queries"
        );

        // 2. Both sub-queries must succeed
        let (page, summary) = tokio::try_join!(
            self.pages.find_page(&page_query),
            self.summaries.summarize(&summary_filter),
        )
        .inspect_err(|e| {
            warn!(partner_id = normalized.partner_id, error = %e, "Payment query failed");
        })?;

        // 3. Continuation
        let next_cursor = Self::next_cursor(&page);
        let has_next = next_cursor.is_some();

        info!(
            partner_id = normalized.partner_id,
            items = page.items.len(),
            total_count = summary.count,
            has_next,
            "Payment query complete"
        );

        Ok(QueryResult {
            items: page.items,
            summary,
            has_next,
            next_cursor,
        })
    }
}
