use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::package::GeoPoint;

/// Immutable proof of a completed delivery. Exactly one record may exist per
/// package; the store enforces the uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub id: Uuid,
    pub package_id: Uuid,
    pub agent_id: Uuid,
    pub location: GeoPoint,
    pub photo_reference: String,
    /// None when reverse geocoding failed; never blocks the delivery.
    pub geocoded_address: Option<String>,
    pub delivered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub delivery_id: Uuid,
    pub photo_url: String,
    pub message: String,
}
