use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::AuthKeys;
use crate::evidence::EvidenceStore;
use crate::geocode::ReverseGeocoder;
use crate::observability::metrics::Metrics;
use crate::store::Store;

/// Shared application state. The store, evidence store and geocoder are
/// injected handles so tests can swap in fakes.
pub struct AppState {
    pub store: Store,
    pub evidence: Arc<dyn EvidenceStore>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub auth: AuthKeys,
    pub upload_dir: PathBuf,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        evidence: Arc<dyn EvidenceStore>,
        geocoder: Arc<dyn ReverseGeocoder>,
        auth: AuthKeys,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            store: Store::new(),
            evidence,
            geocoder,
            auth,
            upload_dir,
            metrics: Metrics::new(),
        }
    }
}
