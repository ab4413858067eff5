use crate::record::{Record, RecordMeta};
use serde::{Deserialize, Serialize};

/// A configured instance of a plugin service, e.g. `ratelimit-for-api-v2`
/// backed by the `ratelimit` service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// Instance name; unique among live plugins.
    #[serde(rename = "name_plugin")]
    pub name: String,

    /// Name of the backing plugin service. Not enforced as a reference.
    #[serde(rename = "plugin_svc_name")]
    pub plugin_service_name: String,

    /// Opaque environment configuration, passed through as text.
    #[serde(rename = "envs", default)]
    pub env_config: String,

    #[serde(rename = "desc", default)]
    pub description: String,

    #[serde(rename = "user_id", default)]
    pub owner_id: String,
}

impl Record for Plugin {
    const KIND: &'static str = "Plugin";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.name)
    }
}
