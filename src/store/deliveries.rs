use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::models::delivery::DeliveryRecord;
use crate::store::{Store, StoreError};

impl Store {
    /// The completion transaction: inserts the delivery record and flips the
    /// package to delivered, or changes nothing at all.
    ///
    /// The vacant-entry reservation on the package id is the race guard: of
    /// two concurrent completions for the same package, exactly one gets the
    /// slot. The package row is only mutated while the reservation is held,
    /// and the record is only inserted after the package transition succeeded,
    /// so a failure on either side leaves both maps untouched.
    pub fn create_delivery(&self, record: DeliveryRecord) -> Result<DeliveryRecord, StoreError> {
        match self.deliveries.entry(record.package_id) {
            Entry::Occupied(_) => Err(StoreError::DuplicatePackageReference(record.package_id)),
            Entry::Vacant(slot) => {
                self.mark_delivered(record.package_id)?;
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    pub fn delivery_for_package(&self, package_id: Uuid) -> Option<DeliveryRecord> {
        self.deliveries
            .get(&package_id)
            .map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::delivery::DeliveryRecord;
    use crate::models::package::{GeoPoint, Package, PackageStatus};
    use crate::store::{Store, StoreError};

    fn seed_pending(store: &Store) -> Uuid {
        let package = Package {
            id: Uuid::new_v4(),
            tracking_code: "PQX300".to_string(),
            recipient: "Carlos Ruiz".to_string(),
            address: "Calle 5 de Mayo 8".to_string(),
            destination: None,
            assigned_agent: None,
            status: PackageStatus::Pending,
        };
        let id = package.id;
        store.insert_package(package).unwrap();
        id
    }

    fn record_for(package_id: Uuid) -> DeliveryRecord {
        DeliveryRecord {
            id: Uuid::new_v4(),
            package_id,
            agent_id: Uuid::new_v4(),
            location: GeoPoint { lat: 19.43, lng: -99.13 },
            photo_reference: "20250101_120000_ab12cd34_door.jpg".to_string(),
            geocoded_address: Some("Av. Reforma 123, CDMX".to_string()),
            delivered_at: Utc::now(),
        }
    }

    #[test]
    fn completion_flips_package_and_stores_record() {
        let store = Store::new();
        let package_id = seed_pending(&store);

        let record = store.create_delivery(record_for(package_id)).unwrap();

        assert_eq!(
            store.get_package(package_id).unwrap().status,
            PackageStatus::Delivered
        );
        let stored = store.delivery_for_package(package_id).unwrap();
        assert_eq!(stored.id, record.id);
        assert_eq!(store.delivery_count(), 1);
    }

    #[test]
    fn second_completion_never_creates_second_record() {
        let store = Store::new();
        let package_id = seed_pending(&store);

        store.create_delivery(record_for(package_id)).unwrap();
        let err = store.create_delivery(record_for(package_id)).unwrap_err();

        assert_eq!(err, StoreError::DuplicatePackageReference(package_id));
        assert_eq!(store.delivery_count(), 1);
    }

    #[test]
    fn failed_transaction_leaves_package_pending() {
        let store = Store::new();
        let package_id = seed_pending(&store);

        // Occupy the record slot directly to force the uniqueness guard to
        // fire inside the transaction.
        let conflicting = record_for(package_id);
        store.deliveries.insert(package_id, conflicting.clone());

        let err = store.create_delivery(record_for(package_id)).unwrap_err();
        assert_eq!(err, StoreError::DuplicatePackageReference(package_id));

        assert_eq!(
            store.get_package(package_id).unwrap().status,
            PackageStatus::Pending
        );
        assert_eq!(
            store.delivery_for_package(package_id).unwrap().id,
            conflicting.id
        );
    }

    #[test]
    fn unknown_package_inserts_nothing() {
        let store = Store::new();
        let package_id = Uuid::new_v4();

        let err = store.create_delivery(record_for(package_id)).unwrap_err();
        assert_eq!(err, StoreError::PackageNotFound(package_id));
        assert_eq!(store.delivery_count(), 0);
    }

    #[test]
    fn concurrent_completions_commit_exactly_once() {
        let store = std::sync::Arc::new(Store::new());
        let package_id = seed_pending(&store);

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.create_delivery(record_for(package_id)))
            })
            .collect();

        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(store.delivery_count(), 1);
        assert_eq!(
            store.get_package(package_id).unwrap().status,
            PackageStatus::Delivered
        );
    }
}
