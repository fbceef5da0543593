//! # Query Normalizer
//!
//! Turns a raw [`QueryFilter`] into a [`NormalizedQuery`].
//!
//! - Bad partner ids, unknown statuses and inverted windows are rejected.
//! - Out-of-range limits are clamped.
//! - Undecodable cursors are dropped and the query restarts from the first page.

use shared_types::PaymentStatus;

use super::cursor::CursorKey;
use super::errors::QueryError;
use super::query::{NormalizedQuery, QueryFilter, TimeWindow};
use crate::config::QueryConfig;

/// Validate and canonicalize a caller filter.
pub fn normalize(filter: &QueryFilter, config: &QueryConfig) -> Result<NormalizedQuery, QueryError> {
    if filter.partner_id <= 0 {
        return Err(QueryError::InvalidPartnerId(filter.partner_id));
    }

    let status = normalize_status(filter.status.as_deref())?;

    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(QueryError::InvalidTimeRange {
                from: from.to_rfc3339(),
                to: to.to_rfc3339(),
            });
        }
    }

    Ok(NormalizedQuery {
        partner_id: filter.partner_id,
        status,
        window: TimeWindow {
            from: filter.from,
            to: filter.to,
        },
        position: CursorKey::parse_lenient(filter.cursor.as_deref()),
        limit: config.clamp_limit(filter.limit),
    })
}

fn normalize_status(raw: Option<&str>) -> Result<Option<PaymentStatus>, QueryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<PaymentStatus>()
            .map(Some)
            .map_err(|_| QueryError::InvalidStatus(value.to_string())),
    }
}
