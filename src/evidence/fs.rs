use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::evidence::{unique_name, EvidenceError, EvidenceStore};

/// Stores delivery photos as files under a base directory.
pub struct FsEvidenceStore {
    base_path: PathBuf,
}

impl FsEvidenceStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl EvidenceStore for FsEvidenceStore {
    async fn store(&self, content: Bytes, suggested_name: &str) -> Result<String, EvidenceError> {
        let name = unique_name(suggested_name);
        let path = self.base_path.join(&name);

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|err| EvidenceError(format!("create {:?}: {err}", self.base_path)))?;

        let mut file = fs::File::create(&path)
            .await
            .map_err(|err| EvidenceError(format!("create {path:?}: {err}")))?;
        file.write_all(&content)
            .await
            .map_err(|err| EvidenceError(format!("write {path:?}: {err}")))?;
        file.sync_all()
            .await
            .map_err(|err| EvidenceError(format!("sync {path:?}: {err}")))?;

        Ok(name)
    }
}
