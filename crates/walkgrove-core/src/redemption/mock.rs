//! Mock planting provider for development and testing.
//!
//! Keeps orders in memory and advances each one step along the fulfillment
//! state machine per status poll, with a short simulated network delay.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use super::provider::{OrderReference, OrderStatus, PlantingStatus, RedemptionProvider};
use crate::error::RedemptionError;

const SIMULATED_LATENCY: Duration = Duration::from_millis(50);

/// In-memory provider that fulfills every order.
#[derive(Default)]
pub struct MockRedemptionProvider {
    orders: HashMap<String, OrderStatus>,
}

impl MockRedemptionProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RedemptionProvider for MockRedemptionProvider {
    fn provider_id(&self) -> &str {
        "mock_provider"
    }

    fn display_name(&self) -> &str {
        "Demo Tree Planting"
    }

    fn description(&self) -> &str {
        "Mock provider for development and testing"
    }

    async fn create_order(
        &mut self,
        _garden_id: Uuid,
        _tree_count: u32,
    ) -> Result<OrderReference, RedemptionError> {
        tokio::time::sleep(SIMULATED_LATENCY).await;

        let order_id = Uuid::new_v4().to_string();
        self.orders.insert(
            order_id.clone(),
            OrderStatus {
                order_id: order_id.clone(),
                status: PlantingStatus::Pending,
                message: Some("Your tree planting order has been received".into()),
                planted_date: None,
                region: Some("Pacific Northwest, USA".into()),
                certificate_url: None,
            },
        );

        Ok(OrderReference {
            order_id,
            provider: self.provider_id().to_string(),
            created_at: Utc::now(),
        })
    }

    async fn fetch_order_status(
        &mut self,
        order: &OrderReference,
    ) -> Result<OrderStatus, RedemptionError> {
        tokio::time::sleep(SIMULATED_LATENCY).await;

        let status = self
            .orders
            .get_mut(&order.order_id)
            .ok_or_else(|| RedemptionError::OrderNotFound {
                order_id: order.order_id.clone(),
            })?;

        // Each poll advances fulfillment one step.
        match status.status {
            PlantingStatus::Pending => {
                status.status = PlantingStatus::Processing;
                status.message = Some("Your trees are being prepared for planting".into());
            }
            PlantingStatus::Processing => {
                status.status = PlantingStatus::Planted;
                status.message = Some("Congratulations! Your trees have been planted!".into());
                status.planted_date = Some(Utc::now());
                status.certificate_url = Some(format!(
                    "https://example.com/certificate/{}",
                    status.order_id
                ));
            }
            PlantingStatus::Planted => {
                status.status = PlantingStatus::Verified;
                status.message =
                    Some("Your tree planting has been verified with photo evidence".into());
            }
            PlantingStatus::Verified | PlantingStatus::Failed => {}
        }

        Ok(status.clone())
    }

    async fn fetch_certificate(
        &mut self,
        order: &OrderReference,
    ) -> Result<Option<String>, RedemptionError> {
        let status = self.fetch_order_status(order).await?;
        Ok(status.certificate_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn order_walks_the_state_machine() {
        let mut provider = MockRedemptionProvider::new();
        let order = provider.create_order(Uuid::new_v4(), 30).await.unwrap();

        let status = provider.fetch_order_status(&order).await.unwrap();
        assert_eq!(status.status, PlantingStatus::Processing);

        let status = provider.fetch_order_status(&order).await.unwrap();
        assert_eq!(status.status, PlantingStatus::Planted);
        assert!(status.planted_date.is_some());
        assert!(status.certificate_url.is_some());

        let status = provider.fetch_order_status(&order).await.unwrap();
        assert_eq!(status.status, PlantingStatus::Verified);
        assert!(status.status.is_complete());

        // Verified is terminal.
        let status = provider.fetch_order_status(&order).await.unwrap();
        assert_eq!(status.status, PlantingStatus::Verified);
    }

    #[tokio::test]
    async fn unknown_order_is_an_error() {
        let mut provider = MockRedemptionProvider::new();
        let bogus = OrderReference {
            order_id: "no-such-order".into(),
            provider: "mock_provider".into(),
            created_at: Utc::now(),
        };
        assert!(matches!(
            provider.fetch_order_status(&bogus).await,
            Err(RedemptionError::OrderNotFound { .. })
        ));
    }
}
