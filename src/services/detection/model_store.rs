// Model Store
// Persistence seam for trained classifier state

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::classifier::PersistedModel;
use crate::error::Result;

/// Where trained classifier state lives between runs.
pub trait ModelStore: Send + Sync {
    /// `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<PersistedModel>>;
    fn save(&self, model: &PersistedModel) -> Result<()>;
}

/// JSON file on disk.
pub struct FileModelStore {
    path: PathBuf,
}

impl FileModelStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelStore for FileModelStore {
    fn load(&self) -> Result<Option<PersistedModel>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let model = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), "model_store.loaded");
        Ok(Some(model))
    }

    fn save(&self, model: &PersistedModel) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(model)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "model_store.saved");
        Ok(())
    }
}
