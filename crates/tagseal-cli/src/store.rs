//! JSON item file: the values the hosting form submits.

use std::path::{Path, PathBuf};

use tagseal_core::fs::write_atomic;
use tagseal_core::StoredItem;

pub struct ItemStore {
    path: PathBuf,
}

impl ItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> anyhow::Result<Vec<StoredItem>> {
        if !self.path.exists() {
            return Err(anyhow::anyhow!(
                "No item file found at {}. Run `tagseal init` or pass --items.",
                self.path.display()
            ));
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            anyhow::anyhow!("Failed to read item file {}: {}", self.path.display(), e)
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse item file {}: {}", self.path.display(), e)
        })
    }

    /// Replace the item file in one step.
    pub fn save(&self, items: &[StoredItem]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
                })?;
            }
        }
        let mut contents = serde_json::to_string_pretty(items)?;
        contents.push('\n');
        write_atomic(&self.path, contents.as_bytes()).map_err(|e| {
            anyhow::anyhow!("Failed to write item file {}: {}", self.path.display(), e)
        })
    }
}
