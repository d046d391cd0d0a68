use std::time::Instant;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::UPLOADS_ROUTE;
use crate::error::AppError;
use crate::models::delivery::{DeliveryReceipt, DeliveryRecord};
use crate::models::package::{GeoPoint, PackageStatus};
use crate::state::AppState;
use crate::store::StoreError;

pub struct CompletionRequest {
    pub package_id: Uuid,
    pub agent_id: Uuid,
    pub location: GeoPoint,
    pub photo: Bytes,
    pub photo_name: String,
}

pub async fn complete_delivery(
    state: &AppState,
    request: CompletionRequest,
) -> Result<DeliveryReceipt, AppError> {
    let start = Instant::now();
    let result = run_completion(state, request).await;

    let outcome = if result.is_ok() { "success" } else { "error" };
    state
        .metrics
        .delivery_latency_seconds
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());
    state
        .metrics
        .deliveries_total
        .with_label_values(&[outcome])
        .inc();

    result
}

/// The completion transition. Validation happens before any side effect; the
/// photo write must succeed before anything else; geocoding is best effort;
/// record insertion and the package state flip commit atomically in the store.
async fn run_completion(
    state: &AppState,
    request: CompletionRequest,
) -> Result<DeliveryReceipt, AppError> {
    let package = state
        .store
        .get_package(request.package_id)
        .ok_or_else(|| AppError::NotFound(format!("package {} not found", request.package_id)))?;

    if package.status != PackageStatus::Pending {
        return Err(AppError::AlreadyCompleted(package.id));
    }

    if !request.location.in_bounds() {
        return Err(AppError::BadRequest(format!(
            "coordinates out of range: lat={}, lng={}",
            request.location.lat, request.location.lng
        )));
    }

    if request.photo.is_empty() {
        return Err(AppError::BadRequest("photo must not be empty".to_string()));
    }

    let suggested_name = format!("{}_{}", package.id, request.photo_name);
    let photo_reference = state
        .evidence
        .store(request.photo, &suggested_name)
        .await
        .map_err(|err| AppError::StorageFailure(err.to_string()))?;

    let geocoded_address = match state.geocoder.reverse(request.location).await {
        Ok(address) => Some(address),
        Err(err) => {
            state.metrics.geocode_failures_total.inc();
            warn!(
                package_id = %package.id,
                error = %err,
                "reverse geocoding failed; recording delivery without address"
            );
            None
        }
    };

    let record = DeliveryRecord {
        id: Uuid::new_v4(),
        package_id: package.id,
        agent_id: request.agent_id,
        location: request.location,
        photo_reference,
        geocoded_address,
        delivered_at: Utc::now(),
    };

    // On any store failure the photo from above is orphaned; cleanup is a
    // maintenance concern, not part of the transition.
    let record = state.store.create_delivery(record).map_err(|err| match err {
        StoreError::PackageNotFound(id) => AppError::NotFound(format!("package {id} not found")),
        other => AppError::Conflict(other.to_string()),
    })?;

    info!(
        package_id = %package.id,
        delivery_id = %record.id,
        agent_id = %request.agent_id,
        "delivery completed"
    );

    Ok(DeliveryReceipt {
        delivery_id: record.id,
        photo_url: format!("{UPLOADS_ROUTE}/{}", record.photo_reference),
        message: "delivery recorded".to_string(),
    })
}
