//! Known-errand registry.
//!
//! Holds the errand descriptors that intermediate stops are matched against.
//! The orchestrator only ever reads it; the web layer may replace or extend
//! it between route computations.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::ErrandDescriptor;

/// Errors loading errands.
#[derive(Debug, thiserror::Error)]
pub enum ErrandError {
    #[error("failed to read errands file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid errands file {path}: {message}")]
    Json { path: String, message: String },
}

/// Thread-safe list of known errands.
#[derive(Debug, Clone, Default)]
pub struct ErrandRegistry {
    inner: Arc<RwLock<Vec<ErrandDescriptor>>>,
}

impl ErrandRegistry {
    /// Create a registry holding `errands`.
    pub fn new(errands: Vec<ErrandDescriptor>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(errands)),
        }
    }

    /// Create an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load errands from a JSON array of descriptors.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ErrandError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ErrandError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let errands: Vec<ErrandDescriptor> =
            serde_json::from_str(&json).map_err(|e| ErrandError::Json {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(errands))
    }

    /// Snapshot of every known errand, in registration order.
    pub async fn list_known_errands(&self) -> Vec<ErrandDescriptor> {
        self.inner.read().await.clone()
    }

    /// Replace the whole list.
    pub async fn replace(&self, errands: Vec<ErrandDescriptor>) {
        *self.inner.write().await = errands;
    }

    /// Append one errand.
    pub async fn add(&self, errand: ErrandDescriptor) {
        self.inner.write().await.push(errand);
    }

    /// Number of known errands.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether no errands are known.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
