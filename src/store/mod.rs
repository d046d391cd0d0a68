pub mod deliveries;
pub mod packages;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::models::agent::Agent;
use crate::models::delivery::DeliveryRecord;
use crate::models::package::Package;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("package {0} not found")]
    PackageNotFound(Uuid),

    #[error("package {0} is not pending")]
    InvalidTransition(Uuid),

    #[error("a delivery record already exists for package {0}")]
    DuplicatePackageReference(Uuid),

    #[error("invalid tracking code: {0}")]
    InvalidTrackingCode(String),

    #[error("tracking code already in use: {0}")]
    DuplicateTrackingCode(String),

    #[error("an agent already exists with email {0}")]
    DuplicateEmail(String),
}

/// In-process store for agents, packages and delivery records.
///
/// Delivery records are keyed by package id: the map key itself is the
/// uniqueness constraint guaranteeing at most one record per package, and the
/// completion transaction reserves that key atomically before touching the
/// package row.
pub struct Store {
    pub(crate) agents: DashMap<Uuid, Agent>,
    pub(crate) emails: DashMap<String, Uuid>,
    pub(crate) packages: DashMap<Uuid, Package>,
    pub(crate) tracking_codes: DashMap<String, Uuid>,
    pub(crate) deliveries: DashMap<Uuid, DeliveryRecord>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            agents: DashMap::new(),
            emails: DashMap::new(),
            packages: DashMap::new(),
            tracking_codes: DashMap::new(),
            deliveries: DashMap::new(),
        }
    }

    pub fn insert_agent(&self, agent: Agent) -> Result<(), StoreError> {
        // Same reservation pattern as tracking codes: the email key is taken
        // atomically, so concurrent onboarding calls cannot both pass a check.
        match self.emails.entry(agent.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEmail(agent.email)),
            Entry::Vacant(slot) => {
                slot.insert(agent.id);
                self.agents.insert(agent.id, agent);
                Ok(())
            }
        }
    }

    pub fn find_agent_by_email(&self, email: &str) -> Option<Agent> {
        let id = *self.emails.get(email)?;
        self.agents.get(&id).map(|entry| entry.value().clone())
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::agent::Agent;
    use crate::store::{Store, StoreError};

    fn agent_with(email: &str) -> Agent {
        Agent {
            id: Uuid::new_v4(),
            name: "Luis Torres".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$placeholderplaceholderpl".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_email_rejected() {
        let store = Store::new();
        store.insert_agent(agent_with("luis@paquexpress.mx")).unwrap();

        let err = store
            .insert_agent(agent_with("luis@paquexpress.mx"))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateEmail("luis@paquexpress.mx".to_string())
        );
        assert_eq!(store.agent_count(), 1);
    }

    #[test]
    fn concurrent_onboarding_keeps_email_unique() {
        let store = std::sync::Arc::new(Store::new());

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.insert_agent(agent_with("luis@paquexpress.mx")))
            })
            .collect();

        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(store.agent_count(), 1);
    }

    #[test]
    fn find_agent_by_email() {
        let store = Store::new();
        let agent = agent_with("ana@paquexpress.mx");
        store.insert_agent(agent.clone()).unwrap();

        let found = store.find_agent_by_email("ana@paquexpress.mx").unwrap();
        assert_eq!(found.id, agent.id);
        assert!(store.find_agent_by_email("nadie@paquexpress.mx").is_none());
    }
}
