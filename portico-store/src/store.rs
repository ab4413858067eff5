use crate::persistence::{MemoryPersistence, Persistence};
use crate::tables::Tables;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use portico_core::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// The entity store.
///
/// Readers take a lock-free snapshot ([`EntityStore::snapshot`]) that never
/// changes underneath them. Writers are serialized: each write runs against
/// a private copy of the current tables, the copy is persisted, and only
/// then is it published. A write that fails at any step publishes nothing,
/// so multi-record writes (the domain cascade) are all-or-nothing.
pub struct EntityStore {
    current: ArcSwap<Tables>,
    writer: Mutex<()>,
    persistence: Arc<dyn Persistence>,
}

impl EntityStore {
    /// Open the store, restoring whatever the backend last saved.
    pub async fn open(persistence: Arc<dyn Persistence>) -> Result<Self> {
        let mut tables = persistence.load().await?.unwrap_or_default();
        tables.rebuild_indexes();
        Ok(Self {
            current: ArcSwap::from_pointee(tables),
            writer: Mutex::new(()),
            persistence,
        })
    }

    /// Empty store without durability.
    pub fn in_memory() -> Self {
        Self {
            current: ArcSwap::from_pointee(Tables::default()),
            writer: Mutex::new(()),
            persistence: Arc::new(MemoryPersistence),
        }
    }

    /// Current committed state.
    pub fn snapshot(&self) -> Arc<Tables> {
        self.current.load_full()
    }

    /// Run `op` as one atomic write.
    ///
    /// `op` receives a mutable copy of the tables and the commit timestamp.
    /// If it returns `Err`, or the backend fails to save, the published
    /// state is left untouched and the error is returned.
    pub async fn write<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Tables, DateTime<Utc>) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.writer.lock().await;

        let mut next = Tables::clone(&self.current.load());
        let out = op(&mut next, Utc::now())?;

        self.persistence.save(&next).await?;
        self.current.store(Arc::new(next));
        debug!("store: snapshot published");
        Ok(out)
    }
}
