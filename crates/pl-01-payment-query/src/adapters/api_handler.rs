//! # API Gateway Handler
//!
//! JSON adapter in front of [`PaymentQueryApi`].
//!
//! ## Architecture
//!
//! ```text
//! Caller (JSON) → ApiGatewayHandler → PaymentQueryApi → query/summary ports
//! ```

use crate::domain::errors::QueryError;
use crate::domain::query::QueryFilter;
use crate::ports::PaymentQueryApi;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::PartnerId;

/// Error from API query handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiQueryError {
    pub code: i32,
    pub message: String,
}

impl ApiQueryError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
        }
    }

    pub fn invalid_params(msg: &str) -> Self {
        Self {
            code: -32602,
            message: msg.to_string(),
        }
    }

    pub fn query_failed(msg: &str) -> Self {
        Self {
            code: -32000,
            message: msg.to_string(),
        }
    }
}

impl std::fmt::Display for ApiQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiQueryError {}

impl From<QueryError> for ApiQueryError {
    fn from(err: QueryError) -> Self {
        if err.is_validation() {
            Self::invalid_params(&err.to_string())
        } else {
            Self::query_failed(&err.to_string())
        }
    }
}

/// Parameters of the `payments_query` method.
///
/// Timestamps accept RFC 3339 (`2024-01-01T00:00:00Z`) or a bare local
/// date-time (`2024-01-01T00:00:00`), the latter read as UTC.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsQueryParams {
    pub partner_id: PartnerId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl PaymentsQueryParams {
    /// Convert into a domain filter.
    pub fn into_filter(self) -> Result<QueryFilter, ApiQueryError> {
        let from = self.from.as_deref().map(|s| parse_timestamp("from", s)).transpose()?;
        let to = self.to.as_deref().map(|s| parse_timestamp("to", s)).transpose()?;

        Ok(QueryFilter {
            partner_id: self.partner_id,
            status: self.status,
            from,
            to,
            cursor: self.cursor,
            limit: self.limit,
        })
    }
}

/// API Gateway handler for payment queries.
pub struct ApiGatewayHandler<S> {
    service: S,
}

impl<S: PaymentQueryApi> ApiGatewayHandler<S> {
    /// Create a new API handler.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Handle ping request (health check).
    pub fn handle_ping(&self) -> serde_json::Value {
        serde_json::json!({
            "status": "ok",
            "subsystem": "pl-01-payment-query"
        })
    }

    /// Handle payments_query request.
    pub async fn handle_payments_query(
        &self,
        params: PaymentsQueryParams,
    ) -> Result<serde_json::Value, ApiQueryError> {
        let filter = params.into_filter()?;
        let result = self.service.query(filter).await?;

        serde_json::to_value(result).map_err(|e| ApiQueryError::query_failed(&e.to_string()))
    }
}

/// Handle an API query.
///
/// ## Supported Methods
///
/// - `ping`: Health check
/// - `payments_query`: Filtered page of payments with summary
pub async fn handle_api_query<S: PaymentQueryApi>(
    handler: &ApiGatewayHandler<S>,
    method: &str,
    params: &serde_json::Value,
) -> Result<serde_json::Value, ApiQueryError> {
    match method {
        "ping" => Ok(handler.handle_ping()),
        "payments_query" => {
            let params: PaymentsQueryParams = serde_json::from_value(params.clone())
                .map_err(|e| ApiQueryError::invalid_params(&format!("Invalid params: {}", e)))?;
            handler.handle_payments_query(params).await
        }
        _ => Err(ApiQueryError::method_not_found(method)),
    }
}

/// Parse a timestamp parameter.
fn parse_timestamp(name: &str, raw: &str) -> Result<DateTime<Utc>, ApiQueryError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ApiQueryError::invalid_params(&format!("Invalid {} timestamp: {}", name, raw)))
}
