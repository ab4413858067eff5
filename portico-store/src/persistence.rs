//! Durability backends for the entity store.
//!
//! The store hands every committed snapshot to a [`Persistence`] before
//! publishing it. [`FilePersistence`] writes the snapshot as JSON: first to
//! a `.tmp` sibling, then renamed over the final path, so a crash mid-write
//! never corrupts stored state.

use crate::tables::Tables;
use async_trait::async_trait;
use portico_core::{PorticoError, Result};
use std::path::PathBuf;

#[async_trait]
pub trait Persistence: Send + Sync {
    /// Load the last saved snapshot. `Ok(None)` means nothing was saved yet.
    async fn load(&self) -> Result<Option<Tables>>;

    /// Durably save a snapshot.
    async fn save(&self, tables: &Tables) -> Result<()>;
}

/// No durability; state lives only as long as the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryPersistence;

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn load(&self) -> Result<Option<Tables>> {
        Ok(None)
    }

    async fn save(&self, _tables: &Tables) -> Result<()> {
        Ok(())
    }
}

/// JSON state file.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Persistence for FilePersistence {
    /// * missing file            → `Ok(None)` (first run)
    /// * unreadable or malformed → `StorageFault`; never silently discarded
    async fn load(&self) -> Result<Option<Tables>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "persist: no state file found, starting fresh");
                return Ok(None);
            }
            Err(e) => return Err(PorticoError::storage("read state file", e)),
        };

        let tables: Tables = serde_json::from_str(&data)
            .map_err(|e| PorticoError::storage("parse state file", e))?;

        tracing::info!(
            domains = tables.domains.live_count(),
            routes = tables.routes.live_count(),
            plugins = tables.plugins.live_count(),
            plugin_services = tables.plugin_services.live_count(),
            path = %self.path.display(),
            "persist: state restored from file"
        );
        Ok(Some(tables))
    }

    async fn save(&self, tables: &Tables) -> Result<()> {
        let json = serde_json::to_string_pretty(tables)
            .map_err(|e| PorticoError::storage("serialize state", e))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PorticoError::storage("create state dir", e))?;
        }

        // Atomic write: tmp file → rename
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| PorticoError::storage("write tmp state file", e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PorticoError::storage("rename tmp state file", e))?;

        tracing::debug!(path = %self.path.display(), "persist: state saved");
        Ok(())
    }
}
