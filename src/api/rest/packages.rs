use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::models::package::{GeoPoint, Package};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/packages/pending/:agent_id", get(list_pending))
}

#[derive(Serialize)]
pub struct PendingPackage {
    pub id: Uuid,
    pub tracking_code: String,
    pub recipient: String,
    pub address: String,
    pub destination: Option<GeoPoint>,
}

impl From<Package> for PendingPackage {
    fn from(package: Package) -> Self {
        Self {
            id: package.id,
            tracking_code: package.tracking_code,
            recipient: package.recipient,
            address: package.address,
            destination: package.destination,
        }
    }
}

async fn list_pending(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<Uuid>,
) -> Json<Vec<PendingPackage>> {
    let pending = state
        .store
        .list_pending_by_agent(agent_id)
        .into_iter()
        .map(PendingPackage::from)
        .collect();

    Json(pending)
}
