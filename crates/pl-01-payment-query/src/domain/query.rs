//! # Query Descriptors
//!
//! Input filter, canonical descriptors handed to the outbound ports, and the
//! result assembled for the caller.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{PartnerId, Payment, PaymentStatus};

use super::cursor::CursorKey;
use super::errors::PortError;

/// Raw filter as supplied by a caller. Constructed once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub partner_id: PartnerId,
    pub status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

impl QueryFilter {
    pub fn new(partner_id: PartnerId) -> Self {
        Self {
            partner_id,
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_window(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Approval-time window: `from` inclusive, `to` exclusive. Either side may be
/// open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| instant >= from) && self.to.is_none_or(|to| instant < to)
    }
}

/// Normalized request: validated predicates, decoded position, clamped limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub partner_id: PartnerId,
    pub status: Option<PaymentStatus>,
    pub window: TimeWindow,
    /// `None` means start of set.
    pub position: Option<CursorKey>,
    pub limit: u32,
}

impl NormalizedQuery {
    /// Descriptor for the page port: predicates plus keyset bounds.
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            partner_id: self.partner_id,
            status: self.status,
            window: self.window,
            after: self.position,
            limit: self.limit,
        }
    }

    /// Descriptor for the summary port: predicates only.
    pub fn summary_filter(&self) -> SummaryFilter {
        SummaryFilter {
            partner_id: self.partner_id,
            status: self.status,
            window: self.window,
        }
    }
}

/// Page request issued to [`crate::ports::PaymentQueryPort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub partner_id: PartnerId,
    pub status: Option<PaymentStatus>,
    pub window: TimeWindow,
    /// Return only records strictly after this key.
    pub after: Option<CursorKey>,
    pub limit: u32,
}

/// Aggregate request issued to [`crate::ports::PaymentSummaryPort`].
///
/// Carries no cursor or limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummaryFilter {
    pub partner_id: PartnerId,
    pub status: Option<PaymentStatus>,
    pub window: TimeWindow,
}

impl SummaryFilter {
    /// Whether a payment satisfies every predicate.
    pub fn matches(&self, payment: &Payment) -> bool {
        payment.partner_id == self.partner_id
            && self.status.is_none_or(|status| payment.status == status)
            && self.window.contains(payment.approved_at)
    }
}

/// One page returned by the query port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Payment>,
    pub has_next: bool,
    /// Position to resume strictly after, when more records exist.
    pub next_key: Option<CursorKey>,
}

impl Page {
    /// A page with nothing beyond it.
    pub fn terminal(items: Vec<Payment>) -> Self {
        Self {
            items,
            has_next: false,
            next_key: None,
        }
    }
}

/// Aggregates over the full filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryProjection {
    pub count: u64,
    pub total_amount: Decimal,
    pub total_net_amount: Decimal,
}

impl SummaryProjection {
    /// Fold payments into count and sums. Fails instead of wrapping or
    /// panicking when a total leaves `Decimal` range.
    pub fn accumulate<'a>(
        payments: impl IntoIterator<Item = &'a Payment>,
    ) -> Result<Self, PortError> {
        payments
            .into_iter()
            .try_fold(Self::default(), |acc, payment| {
                Ok(Self {
                    count: acc.count.checked_add(1).ok_or(PortError::Overflow("count"))?,
                    total_amount: acc
                        .total_amount
                        .checked_add(payment.amount)
                        .ok_or(PortError::Overflow("totalAmount"))?,
                    total_net_amount: acc
                        .total_net_amount
                        .checked_add(payment.net_amount)
                        .ok_or(PortError::Overflow("totalNetAmount"))?,
                })
            })
    }
}

/// Response handed back to the caller.
///
/// `next_cursor.is_some() == has_next` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub items: Vec<Payment>,
    pub summary: SummaryProjection,
    pub has_next: bool,
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payment(id: i64, amount: i64, net: i64) -> Payment {
        Payment {
            id,
            partner_id: 1,
            amount: Decimal::new(amount, 0),
            applied_fee_rate: Decimal::new(300, 4),
            fee_amount: Decimal::new(amount - net, 0),
            net_amount: Decimal::new(net, 0),
            card_bin: None,
            card_last4: Some("4242".to_string()),
            approval_code: format!("APPROVAL-{}", id),
            approved_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            status: PaymentStatus::Approved,
        }
    }

    #[test]
    fn test_window_is_half_open() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let window = TimeWindow {
            from: Some(from),
            to: Some(to),
        };

        assert!(window.contains(from));
        assert!(!window.contains(to));
        assert!(!window.contains(from - chrono::Duration::seconds(1)));
        assert!(TimeWindow::default().contains(to));
    }

    #[test]
    fn test_summary_filter_ignores_pagination() {
        let base = NormalizedQuery {
            partner_id: 1,
            status: Some(PaymentStatus::Approved),
            window: TimeWindow::default(),
            position: None,
            limit: 20,
        };
        let paged = NormalizedQuery {
            position: Some(CursorKey::new(Utc::now(), 9)),
            limit: 3,
            ..base.clone()
        };

        assert_eq!(base.summary_filter(), paged.summary_filter());
        assert_ne!(base.page_query(), paged.page_query());
    }

    #[test]
    fn test_summary_accumulate() {
        let payments = [payment(1, 10_000, 9_700), payment(2, 5_000, 4_850)];
        let summary = SummaryProjection::accumulate(&payments).unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_amount, Decimal::new(15_000, 0));
        assert_eq!(summary.total_net_amount, Decimal::new(14_550, 0));
    }

    #[test]
    fn test_summary_accumulate_reports_overflow() {
        let mut huge = payment(1, 0, 0);
        huge.amount = Decimal::MAX;
        huge.net_amount = Decimal::ONE;
        let payments = [huge.clone(), huge];

        assert_eq!(
            SummaryProjection::accumulate(&payments),
            Err(PortError::Overflow("totalAmount"))
        );
        assert_eq!(
            SummaryProjection::accumulate(&payments[..1]).unwrap().total_amount,
            Decimal::MAX
        );
    }

    #[test]
    fn test_summary_filter_matches_predicates() {
        let filter = SummaryFilter {
            partner_id: 1,
            status: Some(PaymentStatus::Cancelled),
            window: TimeWindow::default(),
        };
        let mut row = payment(1, 100, 97);
        assert!(!filter.matches(&row));

        row.status = PaymentStatus::Cancelled;
        assert!(filter.matches(&row));

        row.partner_id = 2;
        assert!(!filter.matches(&row));
    }
}
