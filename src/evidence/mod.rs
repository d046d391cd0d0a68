pub mod fs;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
#[error("evidence write failed: {0}")]
pub struct EvidenceError(pub String);

/// Write-only blob store for delivery photos. Returns an opaque reference
/// under which the photo can be retrieved later.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    async fn store(&self, content: Bytes, suggested_name: &str) -> Result<String, EvidenceError>;
}

/// Builds a unique blob name from the caller's suggestion. The timestamp keeps
/// names browsable; the random suffix closes the collision window when two
/// completions land in the same second.
pub(crate) fn unique_name(suggested: &str) -> String {
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{stamp}_{}_{}", &suffix[..8], sanitize(suggested))
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "photo".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize, unique_name};

    #[test]
    fn names_are_unique_for_same_suggestion() {
        let a = unique_name("door.jpg");
        let b = unique_name("door.jpg");
        assert_ne!(a, b);
        assert!(a.ends_with("door.jpg"));
    }

    #[test]
    fn path_separators_are_stripped() {
        assert_eq!(sanitize("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize(""), "photo");
    }
}
