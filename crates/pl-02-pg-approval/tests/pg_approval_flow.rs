//! Approval routing against a fake test-PG server.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use pl_02_pg_approval::{
    default_router, MockPgClient, PgApproveRequest, PgCipher, PgClientConfig, PgClientPort,
    PgClientRouter, PgError, PgTransport, TestPgClient,
};
use rust_decimal::Decimal;
use shared_types::PaymentStatus;

/// Decrypts each request like the real provider and approves amounts up to a
/// limit. Larger amounts answer HTTP 422.
struct FakeTestPg {
    cipher: PgCipher,
    api_key: String,
    limit: i64,
    seen_amounts: Mutex<Vec<i64>>,
}

impl FakeTestPg {
    fn new(config: &PgClientConfig, limit: i64) -> Self {
        Self {
            cipher: PgCipher::new(&config.api_key, &config.iv).unwrap(),
            api_key: config.api_key.clone(),
            limit,
            seen_amounts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PgTransport for FakeTestPg {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, PgError> {
        assert!(url.ends_with("/api/v1/pay/credit-card"));
        if api_key != self.api_key {
            return Err(PgError::Http {
                status: 401,
                body: "bad api key".to_string(),
            });
        }

        let enc = body["enc"].as_str().unwrap_or_default();
        let plain = self.cipher.open(enc).map_err(|_| PgError::Http {
            status: 400,
            body: "cannot decrypt".to_string(),
        })?;
        let plain: serde_json::Value = serde_json::from_slice(&plain).unwrap();
        let amount = plain["amount"].as_i64().unwrap();
        self.seen_amounts.lock().push(amount);

        if amount > self.limit {
            return Err(PgError::Http {
                status: 422,
                body: "limit exceeded".to_string(),
            });
        }

        Ok(serde_json::json!({
            "approvalCode": format!("{:08}", amount),
            "approvedAt": "2025-01-01T12:00:00.123",
            "maskedCardLast4": "1111",
            "amount": amount,
            "status": "APPROVED"
        }))
    }
}

fn router(fake: Arc<FakeTestPg>) -> PgClientRouter {
    let test_pg = TestPgClient::new(PgClientConfig::default(), fake).unwrap();
    PgClientRouter::new()
        .register(Arc::new(test_pg))
        .register(Arc::new(MockPgClient::new()))
}

#[tokio::test]
async fn test_even_partner_goes_through_test_pg() {
    let fake = Arc::new(FakeTestPg::new(&PgClientConfig::default(), 1_000_000));
    let router = router(fake.clone());

    let request = PgApproveRequest::new(2, Decimal::new(10_000, 0)).with_card("111111", "1111");
    let result = router.approve(&request).await.unwrap();

    assert_eq!(result.approval_code, "00010000");
    assert_eq!(result.status, PaymentStatus::Approved);
    assert_eq!(fake.seen_amounts.lock().as_slice(), &[10_000]);
}

#[tokio::test]
async fn test_odd_partner_stays_local() {
    let fake = Arc::new(FakeTestPg::new(&PgClientConfig::default(), 1_000_000));
    let router = router(fake.clone());

    let result = router
        .approve(&PgApproveRequest::new(1, Decimal::new(500, 0)))
        .await
        .unwrap();

    assert!(result.approval_code.starts_with("MOCK-"));
    assert!(fake.seen_amounts.lock().is_empty());
}

#[tokio::test]
async fn test_provider_rejection_surfaces_as_approval_failure() {
    let fake = Arc::new(FakeTestPg::new(&PgClientConfig::default(), 100));
    let router = router(fake);

    let err = router
        .approve(&PgApproveRequest::new(4, Decimal::new(5_000, 0)))
        .await
        .unwrap_err();

    match err {
        PgError::ApprovalFailed { partner_id, source } => {
            assert_eq!(partner_id, 4);
            assert!(matches!(*source, PgError::Http { status: 422, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_key_mismatch_is_rejected_by_provider() {
    let provider_config = PgClientConfig {
        api_key: "provider-side-key".to_string(),
        ..PgClientConfig::default()
    };
    let fake = Arc::new(FakeTestPg::new(&provider_config, 1_000_000));
    let router = router(fake);

    let err = router
        .approve(&PgApproveRequest::new(2, Decimal::new(1_000, 0)))
        .await
        .unwrap_err();

    assert!(matches!(err, PgError::ApprovalFailed { .. }));
}

#[test]
fn test_default_router_covers_all_partners() {
    let router = default_router(PgClientConfig::default()).unwrap();

    assert_eq!(router.len(), 2);
    assert_eq!(router.select(2).map(|c| c.name()), Some("test-pg"));
    assert_eq!(router.select(7).map(|c| c.name()), Some("mock-pg"));
}
