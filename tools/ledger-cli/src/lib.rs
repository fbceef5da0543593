//! Ledger-CLI: command line access to the payment ledger
//!
//! - `query`: load payments from a JSON file into the in-memory store and run
//!   a paginated, aggregated query through the JSON API handler
//! - `approve`: request a card approval through the PG router

use std::path::Path;
use std::sync::Arc;

use pl_01_payment_query::{
    handle_api_query, ApiGatewayHandler, ApiQueryError, InMemoryPaymentStore, PaymentsQueryParams,
    QueryConfig, QueryPaymentsService,
};
use pl_02_pg_approval::{PgApproveRequest, PgClientPort, PgError};
use shared_types::Payment;
use thiserror::Error;
use tracing::info;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid payments file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Query rejected: {0}")]
    Query(#[from] ApiQueryError),

    #[error("Approval failed: {0}")]
    Approval(#[from] PgError),
}

/// Load a JSON array of payments.
pub fn load_payments(path: &Path) -> Result<Vec<Payment>, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_payments(&raw)
}

/// Parse a JSON array of payments.
pub fn parse_payments(raw: &str) -> Result<Vec<Payment>, CliError> {
    Ok(serde_json::from_str(raw)?)
}

/// Query handler over an in-memory store seeded with `payments`.
pub fn build_handler(
    payments: Vec<Payment>,
    config: QueryConfig,
) -> ApiGatewayHandler<QueryPaymentsService> {
    let store = Arc::new(InMemoryPaymentStore::with_payments(payments));
    ApiGatewayHandler::new(QueryPaymentsService::from_store(config, store))
}

/// Run one query, or follow `nextCursor` until the last page when `all` is set.
///
/// Returns one JSON result per page fetched.
pub async fn run_query(
    handler: &ApiGatewayHandler<QueryPaymentsService>,
    params: PaymentsQueryParams,
    all: bool,
) -> Result<Vec<serde_json::Value>, CliError> {
    let mut pages = Vec::new();
    let mut params = params;

    loop {
        let request = serde_json::to_value(&params)?;
        let page = handle_api_query(handler, "payments_query", &request).await?;
        let next = page["nextCursor"].as_str().map(str::to_string);
        pages.push(page);

        match next {
            Some(cursor) if all => params.cursor = Some(cursor),
            _ => break,
        }
    }

    info!(pages = pages.len(), "Query finished");
    Ok(pages)
}

/// Request approval from whichever client the router selects.
pub async fn run_approve(
    client: &dyn PgClientPort,
    request: PgApproveRequest,
) -> Result<serde_json::Value, CliError> {
    let result = client.approve(&request).await?;
    Ok(serde_json::to_value(result)?)
}
