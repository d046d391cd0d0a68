use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_TRACKING_CODE_LEN: usize = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn in_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PackageStatus {
    Pending,
    Delivered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: Uuid,
    pub tracking_code: String,
    pub recipient: String,
    pub address: String,
    pub destination: Option<GeoPoint>,
    pub assigned_agent: Option<Uuid>,
    pub status: PackageStatus,
}

/// Tracking codes are human-facing: alphanumeric, non-empty, at most 20 chars.
pub fn tracking_code_valid(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_TRACKING_CODE_LEN
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}
