use crate::record::{Record, RecordMeta};
use serde::{Deserialize, Serialize};

/// A built-in capability template (cors, jwt, ...) with its default config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginService {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub name: String,

    /// JSON text template, stored verbatim.
    #[serde(rename = "baseconfig", default)]
    pub base_config: String,
}

impl PluginService {
    pub fn new(name: impl Into<String>, base_config: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::default(),
            name: name.into(),
            base_config: base_config.into(),
        }
    }
}

impl Record for PluginService {
    const KIND: &'static str = "Plugin service";

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
