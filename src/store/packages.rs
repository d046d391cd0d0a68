use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::models::package::{tracking_code_valid, Package, PackageStatus};
use crate::store::{Store, StoreError};

impl Store {
    pub fn insert_package(&self, package: Package) -> Result<(), StoreError> {
        if !tracking_code_valid(&package.tracking_code) {
            return Err(StoreError::InvalidTrackingCode(package.tracking_code));
        }

        // Reserving the tracking-code key first keeps codes unique under
        // concurrent inserts.
        match self.tracking_codes.entry(package.tracking_code.clone()) {
            Entry::Occupied(_) => {
                Err(StoreError::DuplicateTrackingCode(package.tracking_code))
            }
            Entry::Vacant(slot) => {
                slot.insert(package.id);
                self.packages.insert(package.id, package);
                Ok(())
            }
        }
    }

    pub fn get_package(&self, id: Uuid) -> Option<Package> {
        self.packages.get(&id).map(|entry| entry.value().clone())
    }

    pub fn list_pending_by_agent(&self, agent_id: Uuid) -> Vec<Package> {
        self.packages
            .iter()
            .filter(|entry| {
                let package = entry.value();
                package.status == PackageStatus::Pending
                    && package.assigned_agent == Some(agent_id)
            })
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Flips a pending package to delivered. Only the completion transaction
    /// in `deliveries` may call this; the transition is never reversed.
    pub(crate) fn mark_delivered(&self, id: Uuid) -> Result<(), StoreError> {
        let mut package = self
            .packages
            .get_mut(&id)
            .ok_or(StoreError::PackageNotFound(id))?;

        if package.status != PackageStatus::Pending {
            return Err(StoreError::InvalidTransition(id));
        }

        package.status = PackageStatus::Delivered;
        Ok(())
    }
}
