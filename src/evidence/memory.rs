use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use crate::evidence::{unique_name, EvidenceError, EvidenceStore};

/// In-memory evidence store, used in tests to observe exactly which photo
/// writes happened.
#[derive(Default)]
pub struct MemoryEvidenceStore {
    blobs: DashMap<String, Bytes>,
}

impl MemoryEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn get(&self, reference: &str) -> Option<Bytes> {
        self.blobs.get(reference).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl EvidenceStore for MemoryEvidenceStore {
    async fn store(&self, content: Bytes, suggested_name: &str) -> Result<String, EvidenceError> {
        let name = unique_name(suggested_name);
        self.blobs.insert(name.clone(), content);
        Ok(name)
    }
}
