//! In-Memory Payment Store
//!
//! Implements both outbound ports over a `Vec<Payment>`. Used by the CLI and
//! by tests; a database adapter applies the same predicates in SQL.
//!
//! Rows are stored with `approved_at` truncated to milliseconds, the
//! resolution of the cursor key, so stored order and page order agree.

use crate::domain::cursor::{truncate_to_millis, CursorKey};
use crate::domain::errors::PortError;
use crate::domain::query::{Page, PageQuery, SummaryFilter, SummaryProjection};
use crate::ports::outbound::{PaymentQueryPort, PaymentSummaryPort};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::Payment;
use tracing::debug;

/// In-memory payment ledger.
pub struct InMemoryPaymentStore {
    payments: RwLock<Vec<Payment>>,
}

impl InMemoryPaymentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            payments: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-loaded with payments.
    pub fn with_payments(payments: Vec<Payment>) -> Self {
        Self {
            payments: RwLock::new(payments.into_iter().map(Self::stored).collect()),
        }
    }

    /// Append a payment. Visible to every query issued afterwards.
    pub fn insert(&self, payment: Payment) {
        self.payments.write().push(Self::stored(payment));
    }

    fn stored(mut payment: Payment) -> Payment {
        payment.approved_at = truncate_to_millis(payment.approved_at);
        payment
    }

    pub fn len(&self) -> usize {
        self.payments.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.read().is_empty()
    }
}

impl Default for InMemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentQueryPort for InMemoryPaymentStore {
    async fn find_page(&self, query: &PageQuery) -> Result<Page, PortError> {
        let predicates = SummaryFilter {
            partner_id: query.partner_id,
            status: query.status,
            window: query.window,
        };
        let limit = query.limit as usize;

        let mut rows: Vec<Payment> = {
            let payments = self.payments.read();
            payments
                .iter()
                .filter(|p| predicates.matches(p))
                .filter(|p| query.after.is_none_or(|after| after.precedes(&CursorKey::of(p))))
                .cloned()
                .collect()
        };

        // Newest first, id breaking ties
        rows.sort_by_key(|p| std::cmp::Reverse(CursorKey::of(p)));
        rows.truncate(limit + 1);

        let has_next = rows.len() > limit;
        rows.truncate(limit);
        let next_key = if has_next {
            rows.last().map(CursorKey::of)
        } else {
            None
        };

        debug!(
            "[pl-01] Page for partner {}: {} rows, has_next={}",
            query.partner_id,
            rows.len(),
            has_next
        );

        Ok(Page {
            items: rows,
            has_next,
            next_key,
        })
    }
}

#[async_trait]
impl PaymentSummaryPort for InMemoryPaymentStore {
    async fn summarize(&self, filter: &SummaryFilter) -> Result<SummaryProjection, PortError> {
        let payments = self.payments.read();
        let summary = SummaryProjection::accumulate(payments.iter().filter(|p| filter.matches(p)))?;

        debug!(
            "[pl-01] Summary for partner {}: count={}",
            filter.partner_id, summary.count
        );

        Ok(summary)
    }
}
