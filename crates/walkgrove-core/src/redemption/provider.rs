//! Real-world tree planting provider seam.
//!
//! A completed garden can be traded in for real trees through an external
//! planting service. Providers are asynchronous; order fulfillment walks
//! the `pending -> processing -> planted -> verified` state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RedemptionError;

/// Fulfillment state of a planting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantingStatus {
    Pending,
    Processing,
    Planted,
    Verified,
    Failed,
}

impl PlantingStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            PlantingStatus::Pending => "Pending",
            PlantingStatus::Processing => "Processing",
            PlantingStatus::Planted => "Planted",
            PlantingStatus::Verified => "Verified",
            PlantingStatus::Failed => "Failed",
        }
    }

    /// Trees are in the ground.
    pub fn is_complete(&self) -> bool {
        matches!(self, PlantingStatus::Planted | PlantingStatus::Verified)
    }
}

/// Handle to an order at a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReference {
    pub order_id: String,
    pub provider: String,
    pub created_at: DateTime<Utc>,
}

/// Point-in-time order status as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatus {
    pub order_id: String,
    pub status: PlantingStatus,
    pub message: Option<String>,
    pub planted_date: Option<DateTime<Utc>>,
    pub region: Option<String>,
    pub certificate_url: Option<String>,
}

/// A tree planting service.
#[allow(async_fn_in_trait)]
pub trait RedemptionProvider {
    /// Unique identifier (e.g. "mock_provider").
    fn provider_id(&self) -> &str;

    /// Human-readable display name.
    fn display_name(&self) -> &str;

    fn description(&self) -> &str;

    /// Create a new planting order for a completed garden.
    async fn create_order(
        &mut self,
        garden_id: Uuid,
        tree_count: u32,
    ) -> Result<OrderReference, RedemptionError>;

    /// Fetch the current status of an existing order.
    async fn fetch_order_status(
        &mut self,
        order: &OrderReference,
    ) -> Result<OrderStatus, RedemptionError>;

    /// Certificate URL for a completed order, if issued yet.
    async fn fetch_certificate(
        &mut self,
        order: &OrderReference,
    ) -> Result<Option<String>, RedemptionError>;
}
