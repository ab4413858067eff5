use crate::domain::Domain;
use crate::record::{Record, RecordMeta};
use serde::{Deserialize, Serialize};

/// A Route maps a path on a domain to an upstream URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// Request path pattern
    pub path: String,

    /// Upstream URL requests are forwarded to
    #[serde(rename = "upstream")]
    pub upstream_url: String,

    /// Free-form plugin specification. Plugins attach to the route when
    /// their name occurs anywhere in this string (see `matching`).
    #[serde(rename = "plugin", default)]
    pub plugin_spec: String,

    /// Owning domain
    pub domain_id: u64,

    /// Treat `path` as a prefix rather than an exact match
    #[serde(rename = "usePathAsPrefix", default)]
    pub use_path_as_prefix: bool,
}

impl Route {
    pub fn new(
        path: impl Into<String>,
        upstream_url: impl Into<String>,
        plugin_spec: impl Into<String>,
        domain_id: u64,
    ) -> Self {
        Self {
            meta: RecordMeta::default(),
            path: path.into(),
            upstream_url: upstream_url.into(),
            plugin_spec: plugin_spec.into(),
            domain_id,
            use_path_as_prefix: false,
        }
    }
}

impl Record for Route {
    const KIND: &'static str = "Route";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }
}

/// A route as returned by the admin API, with its owning domain attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteView {
    #[serde(flatten)]
    pub route: Route,
    pub domain: Option<Domain>,
}

impl RouteView {
    pub fn new(route: Route, domain: Option<Domain>) -> Self {
        Self { route, domain }
    }
}
