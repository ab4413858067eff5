use crate::domain::DomainView;
use crate::matching::matches_by_substring;
use crate::plugin::Plugin;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The denormalized configuration snapshot consumed by the gateway runtime.
///
/// `domains` is a keyed mapping; consumers must not rely on its iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub domains: HashMap<String, DomainConfig>,
}

/// All routes of one domain, in storage order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainConfig {
    pub routes: Vec<RouteConfig>,
}

/// One route with its matched plugin instances embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,
    pub upstream: String,
    pub plugin: String,
    #[serde(rename = "usePathAsPrefix")]
    pub use_path_as_prefix: bool,
    pub plugins_data: Vec<Plugin>,
}

impl ConfigDocument {
    /// Join domains → routes → plugins.
    ///
    /// `domains` must already be restricted to live domains carrying their
    /// live routes, and `plugins` to live plugins in storage order. Matched
    /// plugins keep the order of `plugins`, not the order they are mentioned
    /// in the route's spec.
    pub fn resolve(domains: &[DomainView], plugins: &[Plugin]) -> Self {
        let domains = domains
            .iter()
            .map(|view| {
                let routes = view
                    .routes
                    .iter()
                    .map(|route| RouteConfig {
                        path: route.path.clone(),
                        upstream: route.upstream_url.clone(),
                        plugin: route.plugin_spec.clone(),
                        use_path_as_prefix: route.use_path_as_prefix,
                        plugins_data: plugins
                            .iter()
                            .filter(|p| matches_by_substring(&route.plugin_spec, &p.name))
                            .cloned()
                            .collect(),
                    })
                    .collect();
                (view.domain.name.clone(), DomainConfig { routes })
            })
            .collect();
        Self { domains }
    }

    /// Total number of routes across all domains.
    pub fn route_count(&self) -> usize {
        self.domains.values().map(|d| d.routes.len()).sum()
    }
}
