use crate::record::{Record, RecordMeta};
use crate::route::Route;
use serde::{Deserialize, Serialize};

/// A virtual host grouping a set of routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// Host name; unique among live domains.
    pub name: String,

    /// Owning user.
    #[serde(rename = "user_id")]
    pub owner_id: String,
}

impl Domain {
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::default(),
            name: name.into(),
            owner_id: owner_id.into(),
        }
    }
}

impl Record for Domain {
    const KIND: &'static str = "Domain";

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

/// A domain as returned by the admin API, with its live routes attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainView {
    #[serde(flatten)]
    pub domain: Domain,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl DomainView {
    pub fn new(domain: Domain, routes: Vec<Route>) -> Self {
        Self { domain, routes }
    }
}
