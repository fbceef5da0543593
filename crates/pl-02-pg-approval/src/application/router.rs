//! PG provider routing.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::PartnerId;
use tracing::{debug, warn};

use crate::domain::{PgApproveRequest, PgApproveResult, PgError};
use crate::ports::PgClientPort;

/// Dispatches each approval to the first registered client that supports
/// the partner. Registration order is priority order.
#[derive(Default)]
pub struct PgClientRouter {
    clients: Vec<Arc<dyn PgClientPort>>,
}

impl PgClientRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client at the lowest priority.
    pub fn register(mut self, client: Arc<dyn PgClientPort>) -> Self {
        self.clients.push(client);
        self
    }

    /// Client selected for a partner, if any.
    pub fn select(&self, partner_id: PartnerId) -> Option<&Arc<dyn PgClientPort>> {
        self.clients.iter().find(|c| c.supports(partner_id))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[async_trait]
impl PgClientPort for PgClientRouter {
    fn name(&self) -> &'static str {
        "router"
    }

    fn supports(&self, partner_id: PartnerId) -> bool {
        self.select(partner_id).is_some()
    }

    async fn approve(&self, request: &PgApproveRequest) -> Result<PgApproveResult, PgError> {
        let Some(client) = self.select(request.partner_id) else {
            warn!(partner_id = request.partner_id, "No PG client registered for partner");
            return Err(PgError::NoProvider(request.partner_id));
        };

        debug!(
            partner_id = request.partner_id,
            provider = client.name(),
            "Routing approval"
        );
        client.approve(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockPgClient;
    use rust_decimal::Decimal;
    use shared_types::PaymentStatus;

    /// Client for one fixed partner that returns a fixed code.
    struct FixedClient {
        partner_id: PartnerId,
        code: &'static str,
    }

    #[async_trait]
    impl PgClientPort for FixedClient {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn supports(&self, partner_id: PartnerId) -> bool {
            partner_id == self.partner_id
        }

        async fn approve(&self, _request: &PgApproveRequest) -> Result<PgApproveResult, PgError> {
            Ok(PgApproveResult {
                approval_code: self.code.to_string(),
                approved_at: chrono::Utc::now().naive_utc(),
                status: PaymentStatus::Approved,
            })
        }
    }

    fn request(partner_id: PartnerId) -> PgApproveRequest {
        PgApproveRequest::new(partner_id, Decimal::new(1_000, 0))
    }

    #[tokio::test]
    async fn test_first_supporting_client_wins() {
        let router = PgClientRouter::new()
            .register(Arc::new(FixedClient {
                partner_id: 3,
                code: "FIXED",
            }))
            .register(Arc::new(MockPgClient::new()));

        let fixed = router.approve(&request(3)).await.unwrap();
        assert_eq!(fixed.approval_code, "FIXED");

        let mocked = router.approve(&request(5)).await.unwrap();
        assert_eq!(mocked.approval_code, "MOCK-00000001");
    }

    #[tokio::test]
    async fn test_no_provider() {
        let router = PgClientRouter::new().register(Arc::new(MockPgClient::new()));

        assert!(!router.supports(2));
        assert!(matches!(
            router.approve(&request(2)).await,
            Err(PgError::NoProvider(2))
        ));
    }

    #[test]
    fn test_empty_router() {
        let router = PgClientRouter::new();
        assert!(router.is_empty());
        assert!(router.select(1).is_none());
    }
}
