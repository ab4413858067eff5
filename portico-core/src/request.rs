//! Admin API payloads and list filters.
//!
//! Create payloads default every field so a missing key surfaces as a
//! readable "X is required" message instead of a deserializer error.
//! Update payloads are partial: `None` leaves a field alone, and so does an
//! empty string on a non-nullable field. Only the route plugin spec treats
//! `Some("")` as "clear".

use crate::domain::Domain;
use crate::error::Result;
use crate::plugin::Plugin;
use crate::plugin_service::PluginService;
use crate::record::RecordMeta;
use crate::route::Route;
use crate::validation::FieldCheck;
use serde::Deserialize;

const NAME_MAX: usize = 255;
const UPSTREAM_MAX: usize = 500;
const TEXT_MAX: usize = 1000;
const BASE_CONFIG_MAX: usize = 5000;

/// Non-empty value of a partial update field.
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ── Domains ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDomainRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_id: String,
}

impl CreateDomainRequest {
    pub fn validate(&self) -> Result<()> {
        FieldCheck::new()
            .required("Name", &self.name, NAME_MAX)
            .required("User ID", &self.user_id, NAME_MAX)
            .finish()
    }

    pub fn into_domain(self) -> Domain {
        Domain::new(self.name, self.user_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDomainRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl UpdateDomainRequest {
    pub fn validate(&self) -> Result<()> {
        FieldCheck::new()
            .optional("Name", self.name.as_deref(), NAME_MAX)
            .finish()
    }

    pub fn apply_to(&self, domain: &mut Domain) {
        if let Some(name) = supplied(&self.name) {
            domain.name = name.to_string();
        }
    }
}

// ── Routes ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRouteRequest {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub upstream: String,
    #[serde(default)]
    pub plugin: String,
    #[serde(default)]
    pub domain_id: u64,
    #[serde(rename = "usePathAsPrefix", default)]
    pub use_path_as_prefix: bool,
}

impl CreateRouteRequest {
    pub fn validate(&self) -> Result<()> {
        FieldCheck::new()
            .required("Path", &self.path, NAME_MAX)
            .required("Upstream URL", &self.upstream, UPSTREAM_MAX)
            .optional("Plugin", Some(self.plugin.as_str()), NAME_MAX)
            .required_id("Domain ID", self.domain_id)
            .finish()
    }

    pub fn into_route(self) -> Route {
        Route {
            meta: RecordMeta::default(),
            path: self.path,
            upstream_url: self.upstream,
            plugin_spec: self.plugin,
            domain_id: self.domain_id,
            use_path_as_prefix: self.use_path_as_prefix,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRouteRequest {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub upstream: Option<String>,
    /// Nullable: `Some("")` clears the spec.
    #[serde(default)]
    pub plugin: Option<String>,
    /// `0` is treated as not supplied.
    #[serde(default)]
    pub domain_id: Option<u64>,
    #[serde(rename = "usePathAsPrefix", default)]
    pub use_path_as_prefix: Option<bool>,
}

impl UpdateRouteRequest {
    pub fn validate(&self) -> Result<()> {
        FieldCheck::new()
            .optional("Path", self.path.as_deref(), NAME_MAX)
            .optional("Upstream URL", self.upstream.as_deref(), UPSTREAM_MAX)
            .optional("Plugin", self.plugin.as_deref(), NAME_MAX)
            .finish()
    }

    /// The new owning domain, if one was supplied.
    pub fn target_domain(&self) -> Option<u64> {
        self.domain_id.filter(|id| *id != 0)
    }

    pub fn apply_to(&self, route: &mut Route) {
        if let Some(path) = supplied(&self.path) {
            route.path = path.to_string();
        }
        if let Some(upstream) = supplied(&self.upstream) {
            route.upstream_url = upstream.to_string();
        }
        if let Some(plugin) = &self.plugin {
            route.plugin_spec = plugin.clone();
        }
        if let Some(domain_id) = self.target_domain() {
            route.domain_id = domain_id;
        }
        if let Some(prefix) = self.use_path_as_prefix {
            route.use_path_as_prefix = prefix;
        }
    }
}

/// Narrow update touching only a route's plugin spec.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoutePluginRequest {
    #[serde(default)]
    pub plugins: Option<String>,
}

impl UpdateRoutePluginRequest {
    pub fn validate(&self) -> Result<()> {
        FieldCheck::new()
            .optional("Plugin", self.plugins.as_deref(), NAME_MAX)
            .finish()
    }

    pub fn apply_to(&self, route: &mut Route) {
        if let Some(spec) = &self.plugins {
            route.plugin_spec = spec.clone();
        }
    }
}

// ── Plugins ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePluginRequest {
    #[serde(default)]
    pub name_plugin: String,
    #[serde(default)]
    pub plugin_svc_name: String,
    #[serde(default)]
    pub envs: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub user_id: String,
}

impl CreatePluginRequest {
    pub fn validate(&self) -> Result<()> {
        FieldCheck::new()
            .required("Plugin Name", &self.name_plugin, NAME_MAX)
            .required("Plugin Service Name", &self.plugin_svc_name, NAME_MAX)
            .optional("Environment Variables", Some(self.envs.as_str()), TEXT_MAX)
            .optional("Description", Some(self.desc.as_str()), TEXT_MAX)
            .required("User ID", &self.user_id, NAME_MAX)
            .finish()
    }

    pub fn into_plugin(self) -> Plugin {
        Plugin {
            meta: RecordMeta::default(),
            name: self.name_plugin,
            plugin_service_name: self.plugin_svc_name,
            env_config: self.envs,
            description: self.desc,
            owner_id: self.user_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePluginRequest {
    #[serde(default)]
    pub name_plugin: Option<String>,
    #[serde(default)]
    pub plugin_svc_name: Option<String>,
    #[serde(default)]
    pub envs: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

impl UpdatePluginRequest {
    pub fn validate(&self) -> Result<()> {
        FieldCheck::new()
            .optional("Plugin Name", self.name_plugin.as_deref(), NAME_MAX)
            .optional("Plugin Service Name", self.plugin_svc_name.as_deref(), NAME_MAX)
            .optional("Environment Variables", self.envs.as_deref(), TEXT_MAX)
            .optional("Description", self.desc.as_deref(), TEXT_MAX)
            .finish()
    }

    pub fn apply_to(&self, plugin: &mut Plugin) {
        if let Some(name) = supplied(&self.name_plugin) {
            plugin.name = name.to_string();
        }
        if let Some(svc) = supplied(&self.plugin_svc_name) {
            plugin.plugin_service_name = svc.to_string();
        }
        if let Some(envs) = supplied(&self.envs) {
            plugin.env_config = envs.to_string();
        }
        if let Some(desc) = supplied(&self.desc) {
            plugin.description = desc.to_string();
        }
    }
}

// ── Plugin services ───────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePluginServiceRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub baseconfig: String,
}

impl CreatePluginServiceRequest {
    pub fn validate(&self) -> Result<()> {
        FieldCheck::new()
            .required("Name", &self.name, NAME_MAX)
            .optional("Base Configuration", Some(self.baseconfig.as_str()), BASE_CONFIG_MAX)
            .finish()
    }

    pub fn into_plugin_service(self) -> PluginService {
        PluginService::new(self.name, self.baseconfig)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePluginServiceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub baseconfig: Option<String>,
}

impl UpdatePluginServiceRequest {
    pub fn validate(&self) -> Result<()> {
        FieldCheck::new()
            .optional("Name", self.name.as_deref(), NAME_MAX)
            .optional("Base Configuration", self.baseconfig.as_deref(), BASE_CONFIG_MAX)
            .finish()
    }

    pub fn apply_to(&self, service: &mut PluginService) {
        if let Some(name) = supplied(&self.name) {
            service.name = name.to_string();
        }
        if let Some(config) = supplied(&self.baseconfig) {
            service.base_config = config.to_string();
        }
    }
}

// ── List filters ──────────────────────────────────────────────
//
// Deserialized from query strings. Unknown keys are ignored and empty
// values mean "no filter".

fn contains_filter(filter: &Option<String>, value: &str) -> bool {
    supplied(filter).is_none_or(|needle| value.contains(needle))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainFilter {
    #[serde(default)]
    pub name: Option<String>,
}

impl DomainFilter {
    pub fn matches(&self, domain: &Domain) -> bool {
        contains_filter(&self.name, &domain.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteFilter {
    /// Kept as text: values that do not parse as an id are ignored.
    #[serde(default)]
    pub domain_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl RouteFilter {
    pub fn domain_id(&self) -> Option<u64> {
        self.domain_id.as_deref().and_then(|v| v.trim().parse().ok())
    }

    pub fn matches(&self, route: &Route) -> bool {
        self.domain_id().is_none_or(|id| route.domain_id == id)
            && contains_filter(&self.path, &route.path)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginFilter {
    #[serde(default)]
    pub name_plugin: Option<String>,
    #[serde(default)]
    pub plugin_svc_name: Option<String>,
}

impl PluginFilter {
    pub fn matches(&self, plugin: &Plugin) -> bool {
        contains_filter(&self.name_plugin, &plugin.name)
            && contains_filter(&self.plugin_svc_name, &plugin.plugin_service_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginServiceFilter {
    #[serde(default)]
    pub name: Option<String>,
}

impl PluginServiceFilter {
    pub fn matches(&self, service: &PluginService) -> bool {
        contains_filter(&self.name, &service.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PorticoError;

    #[test]
    fn create_route_reports_every_missing_field() {
        let req: CreateRouteRequest = serde_json::from_str("{}").unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(
            err,
            PorticoError::Validation(
                "Path is required; Upstream URL is required; Domain ID is required".into()
            )
        );
    }

    #[test]
    fn create_route_rejects_long_upstream() {
        let req = CreateRouteRequest {
            path: "/".into(),
            upstream: "u".repeat(501),
            domain_id: 1,
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(PorticoError::Validation(m)) if m.contains("at most 500")));
    }

    #[test]
    fn partial_route_update_only_touches_supplied_fields() {
        let mut route = Route::new("/old", "http://up", "jwt", 4);
        let req: UpdateRouteRequest = serde_json::from_str(r#"{"path":"/new"}"#).unwrap();
        req.apply_to(&mut route);
        assert_eq!(route.path, "/new");
        assert_eq!(route.upstream_url, "http://up");
        assert_eq!(route.plugin_spec, "jwt");
        assert_eq!(route.domain_id, 4);
    }

    #[test]
    fn empty_strings_ignored_for_non_nullable_route_fields() {
        let mut route = Route::new("/old", "http://up", "jwt", 4);
        let req: UpdateRouteRequest =
            serde_json::from_str(r#"{"path":"","upstream":"","plugin":"","domain_id":0}"#).unwrap();
        req.apply_to(&mut route);
        assert_eq!(route.path, "/old");
        assert_eq!(route.upstream_url, "http://up");
        assert_eq!(route.plugin_spec, "", "plugin spec is nullable and clears");
        assert_eq!(route.domain_id, 4);
        assert_eq!(req.target_domain(), None);
    }

    #[test]
    fn route_plugin_request_null_leaves_spec() {
        let mut route = Route::new("/", "http://up", "cors", 1);
        let req: UpdateRoutePluginRequest = serde_json::from_str(r#"{"plugins":null}"#).unwrap();
        req.apply_to(&mut route);
        assert_eq!(route.plugin_spec, "cors");
    }

    #[test]
    fn plugin_update_ignores_empty_text() {
        let mut plugin = CreatePluginRequest {
            name_plugin: "p".into(),
            plugin_svc_name: "cors".into(),
            envs: "{}".into(),
            desc: "d".into(),
            user_id: "u".into(),
        }
        .into_plugin();
        let req: UpdatePluginRequest =
            serde_json::from_str(r#"{"envs":"","desc":"new"}"#).unwrap();
        req.apply_to(&mut plugin);
        assert_eq!(plugin.env_config, "{}");
        assert_eq!(plugin.description, "new");
    }

    #[test]
    fn route_filter_ignores_unparsable_domain_id() {
        let filter = RouteFilter {
            domain_id: Some("abc".into()),
            path: None,
        };
        assert_eq!(filter.domain_id(), None);
        assert!(filter.matches(&Route::new("/", "http://u", "", 9)));
    }

    #[test]
    fn filters_match_substrings() {
        let filter = DomainFilter {
            name: Some("example".into()),
        };
        assert!(filter.matches(&Domain::new("api.example.com", "u")));
        assert!(!filter.matches(&Domain::new("api.test", "u")));
        assert!(DomainFilter { name: Some(String::new()) }.matches(&Domain::new("x", "u")));
    }
}
