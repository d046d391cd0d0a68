use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::package::GeoPoint;

/// All transport, status and parsing problems collapse into this one error;
/// callers treat every geocoding failure identically (best effort, never
/// fatal to a delivery).
#[derive(Debug, Error)]
#[error("reverse geocoding failed: {0}")]
pub struct GeocodeError(pub String);

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, point: GeoPoint) -> Result<String, GeocodeError>;
}

/// Reverse geocoding against a Nominatim-compatible endpoint. The request
/// timeout is baked into the client so a slow upstream can never hold a
/// delivery longer than the configured bound.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("paquexpress/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| GeocodeError(format!("building http client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, point: GeoPoint) -> Result<String, GeocodeError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", point.lat.to_string()),
                ("lon", point.lng.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(|err| GeocodeError(format!("request: {err}")))?;

        if !response.status().is_success() {
            return Err(GeocodeError(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body: NominatimResponse = response
            .json()
            .await
            .map_err(|err| GeocodeError(format!("decoding response: {err}")))?;

        body.display_name
            .ok_or_else(|| GeocodeError("response missing display_name".to_string()))
    }
}
