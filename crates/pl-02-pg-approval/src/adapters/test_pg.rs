//! # Test PG Client
//!
//! Remote sandbox PG. Handles even partner ids.
//!
//! ```text
//! PgApproveRequest → plaintext JSON → PgCipher::seal → {"enc": ...}
//!                  → POST <api_url>/api/v1/pay/credit-card (API-KEY header)
//!                  → TestPgResponse → PgApproveResult
//! ```
//!
//! Card data never appears in logs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use shared_types::{PartnerId, PaymentStatus};
use tracing::{error, info};

use super::cipher::PgCipher;
use crate::config::PgClientConfig;
use crate::domain::{PgApproveRequest, PgApproveResult, PgError};
use crate::ports::{PgClientPort, PgTransport};

/// Sandbox card that the test PG always approves.
const TEST_CARD_NUMBER: &str = "1111-1111-1111-1111";
const TEST_BIRTH_DATE: &str = "19900101";
const TEST_EXPIRY: &str = "1227";
const TEST_PASSWORD: &str = "12";

/// Plaintext body before encryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPgPlainRequest {
    pub card_number: String,
    pub birth_date: String,
    pub expiry: String,
    pub password: String,
    pub amount: i32,
}

/// Encrypted request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPgEncryptedRequest {
    pub enc: String,
}

/// Approval response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPgResponse {
    pub approval_code: String,
    pub approved_at: String,
    pub masked_card_last4: String,
    pub amount: i64,
    pub status: String,
}

impl TestPgResponse {
    fn into_result(self) -> Result<PgApproveResult, PgError> {
        let approved_at = parse_local_date_time(&self.approved_at).map_err(|e| {
            PgError::InvalidResponse(format!("approvedAt {:?}: {}", self.approved_at, e))
        })?;
        let status = self
            .status
            .parse::<PaymentStatus>()
            .map_err(|e| PgError::InvalidResponse(e.to_string()))?;

        Ok(PgApproveResult {
            approval_code: self.approval_code,
            approved_at,
            status,
        })
    }
}

/// ISO local date-time; seconds and fraction are optional.
fn parse_local_date_time(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
}

/// Client for the remote test PG.
pub struct TestPgClient {
    config: PgClientConfig,
    cipher: PgCipher,
    transport: Arc<dyn PgTransport>,
}

impl TestPgClient {
    /// Create a client. Fails if the configured IV is unusable.
    pub fn new(config: PgClientConfig, transport: Arc<dyn PgTransport>) -> Result<Self, PgError> {
        let cipher = PgCipher::new(&config.api_key, &config.iv)?;
        Ok(Self {
            config,
            cipher,
            transport,
        })
    }

    pub fn config(&self) -> &PgClientConfig {
        &self.config
    }

    /// Build the plaintext body for a request.
    fn plain_request(request: &PgApproveRequest) -> Result<TestPgPlainRequest, PgError> {
        let amount = request.amount.trunc().to_i32().ok_or_else(|| {
            PgError::InvalidRequest(format!("amount {} out of range", request.amount))
        })?;

        Ok(TestPgPlainRequest {
            card_number: TEST_CARD_NUMBER.to_string(),
            birth_date: TEST_BIRTH_DATE.to_string(),
            expiry: TEST_EXPIRY.to_string(),
            password: TEST_PASSWORD.to_string(),
            amount,
        })
    }

    async fn try_approve(&self, request: &PgApproveRequest) -> Result<PgApproveResult, PgError> {
        let plain = Self::plain_request(request)?;
        let plain_json = serde_json::to_vec(&plain)
            .map_err(|e| PgError::InvalidRequest(e.to_string()))?;

        let body = TestPgEncryptedRequest {
            enc: self.cipher.seal(&plain_json)?,
        };
        let body = serde_json::to_value(body).map_err(|e| PgError::InvalidRequest(e.to_string()))?;

        let raw = self
            .transport
            .post_json(&self.config.approval_url(), &self.config.api_key, &body)
            .await?;

        let response: TestPgResponse =
            serde_json::from_value(raw).map_err(|e| PgError::InvalidResponse(e.to_string()))?;
        response.into_result()
    }
}

#[async_trait]
impl PgClientPort for TestPgClient {
    fn name(&self) -> &'static str {
        "test-pg"
    }

    fn supports(&self, partner_id: PartnerId) -> bool {
        partner_id % 2 == 0
    }

    async fn approve(&self, request: &PgApproveRequest) -> Result<PgApproveResult, PgError> {
        info!(
            partner_id = request.partner_id,
            amount = %request.amount,
            "TestPG approval requested"
        );

        match self.try_approve(request).await {
            Ok(result) => {
                info!(
                    partner_id = request.partner_id,
                    approval_code = %result.approval_code,
                    "TestPG approval complete"
                );
                Ok(result)
            }
            Err(e) => {
                error!(partner_id = request.partner_id, error = %e, "TestPG approval failed");
                Err(PgError::ApprovalFailed {
                    partner_id: request.partner_id,
                    source: Box::new(e),
                })
            }
        }
    }
}
