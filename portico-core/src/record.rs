use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Bookkeeping columns shared by every stored entity.
///
/// Flattened into each entity so the wire shape stays
/// `{"id": .., "created_at": .., "updated_at": .., "deleted_at": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    /// Tombstone. `None` means the row is live.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RecordMeta {
    /// The single visibility predicate used by every read path.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A stored entity: an id, timestamps, a tombstone and an optional unique key.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Label used in messages, e.g. "Domain" → "Domain not found".
    const KIND: &'static str;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Value that must be unique among live rows, if the entity has one.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    fn id(&self) -> u64 {
        self.meta().id
    }

    fn is_live(&self) -> bool {
        self.meta().is_live()
    }
}
