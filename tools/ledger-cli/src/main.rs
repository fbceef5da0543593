//! Ledger-CLI: query payment pages and request PG approvals from the shell.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ledger_cli::{build_handler, load_payments, run_approve, run_query, CliError};
use ledger_telemetry::{init_logging, TelemetryConfig};
use pl_01_payment_query::{PaymentsQueryParams, QueryConfig};
use pl_02_pg_approval::{default_router, PgApproveRequest, PgClientConfig};
use rust_decimal::Decimal;
use tracing::error;

/// Ledger-CLI: Payment-Ledger command line
#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Query the payment ledger and request PG approvals")]
struct Args {
    /// Log level filter (overrides LEDGER_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a paginated payment query against a JSON payments file
    Query {
        /// JSON array of payments
        #[arg(short, long)]
        data: PathBuf,

        /// Partner to query
        #[arg(short, long)]
        partner: i64,

        /// Status filter (APPROVED, FAILED, CANCELLED)
        #[arg(short, long)]
        status: Option<String>,

        /// Window start, inclusive (RFC 3339 or local date-time read as UTC)
        #[arg(long)]
        from: Option<String>,

        /// Window end, exclusive
        #[arg(long)]
        to: Option<String>,

        /// Continuation cursor from a previous page
        #[arg(short, long)]
        cursor: Option<String>,

        /// Page size
        #[arg(short, long)]
        limit: Option<i64>,

        /// Follow nextCursor until the last page
        #[arg(long)]
        all: bool,
    },

    /// Request a card approval (even partners: test PG, odd partners: mock)
    Approve {
        /// Partner requesting the approval
        #[arg(short, long)]
        partner: i64,

        /// Amount to approve
        #[arg(short, long)]
        amount: Decimal,

        /// Product name shown to the PG
        #[arg(long)]
        product: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::for_service("ledger-cli");
    if let Some(level) = args.log_level {
        telemetry = telemetry.with_log_level(level);
    }
    if let Err(e) = init_logging(&telemetry) {
        eprintln!("Warning: Failed to init logging: {}", e);
    }

    match run(args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Query {
            data,
            partner,
            status,
            from,
            to,
            cursor,
            limit,
            all,
        } => {
            let handler = build_handler(load_payments(&data)?, QueryConfig::from_env());
            let params = PaymentsQueryParams {
                partner_id: partner,
                status,
                from,
                to,
                cursor,
                limit,
            };

            for page in run_query(&handler, params, all).await? {
                println!("{}", serde_json::to_string_pretty(&page)?);
            }
        }
        Command::Approve {
            partner,
            amount,
            product,
        } => {
            let router = default_router(PgClientConfig::from_env())?;
            let mut request = PgApproveRequest::new(partner, amount);
            if let Some(name) = product {
                request = request.with_product(name);
            }

            let result = run_approve(&router, request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
