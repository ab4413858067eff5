use crate::table::Table;
use chrono::{DateTime, Utc};
use portico_core::record::Record;
use portico_core::{
    Domain, DomainView, Plugin, PluginService, PorticoError, Result, Route, RouteView,
};
use serde::{Deserialize, Serialize};

/// The full set of entity tables. One value of this type is one
/// consistent snapshot of the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub domains: Table<Domain>,
    #[serde(default)]
    pub routes: Table<Route>,
    #[serde(default)]
    pub plugins: Table<Plugin>,
    #[serde(default)]
    pub plugin_services: Table<PluginService>,
}

impl Tables {
    /// Live routes owned by a domain, in storage order.
    pub fn routes_of(&self, domain_id: u64) -> impl Iterator<Item = &Route> {
        self.routes.live().filter(move |r| r.domain_id == domain_id)
    }

    /// A live domain with its live routes attached.
    pub fn domain_view(&self, domain: &Domain) -> DomainView {
        DomainView::new(domain.clone(), self.routes_of(domain.id()).cloned().collect())
    }

    /// Every live domain with its live routes.
    pub fn domain_views(&self) -> Vec<DomainView> {
        self.domains.live().map(|d| self.domain_view(d)).collect()
    }

    /// A route with its owning domain attached, if that domain is live.
    pub fn route_view(&self, route: &Route) -> RouteView {
        RouteView::new(route.clone(), self.domains.get(route.domain_id).ok().cloned())
    }

    /// Tombstone a domain that owns no live routes.
    ///
    /// Fails with `ReferentialIntegrity` while routes still point at it;
    /// use [`Tables::delete_domain_cascade`] to remove both.
    pub fn delete_domain(&mut self, id: u64, now: DateTime<Utc>) -> Result<Domain> {
        self.domains.get(id)?;
        let dependents = self.routes_of(id).count();
        if dependents > 0 {
            return Err(PorticoError::ReferentialIntegrity(format!(
                "Domain {id} still owns {dependents} route(s)"
            )));
        }
        self.domains.soft_delete(id, now)
    }

    /// Tombstone a domain's live routes, then the domain.
    ///
    /// Returns the deleted domain and how many routes went with it. Callers
    /// run this inside a single store write so both halves publish together.
    pub fn delete_domain_cascade(
        &mut self,
        id: u64,
        now: DateTime<Utc>,
    ) -> Result<(Domain, usize)> {
        self.domains.get(id)?;
        let owned: Vec<u64> = self.routes_of(id).map(|r| r.id()).collect();
        for route_id in &owned {
            self.routes.soft_delete(*route_id, now)?;
        }
        let domain = self.delete_domain(id, now)?;
        Ok((domain, owned.len()))
    }

    pub(crate) fn rebuild_indexes(&mut self) {
        self.domains.rebuild_index();
        self.routes.rebuild_index();
        self.plugins.rebuild_index();
        self.plugin_services.rebuild_index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (Tables, u64) {
        let mut t = Tables::default();
        let now = Utc::now();
        let d = t.domains.insert(Domain::new("a.test", "u"), now).unwrap();
        t.routes.insert(Route::new("/one", "http://1", "", d.id()), now).unwrap();
        t.routes.insert(Route::new("/two", "http://2", "", d.id()), now).unwrap();
        (t, d.id())
    }

    #[test]
    fn plain_delete_blocked_by_live_routes() {
        let (mut t, id) = seeded();
        let err = t.delete_domain(id, Utc::now()).unwrap_err();
        assert!(matches!(err, PorticoError::ReferentialIntegrity(_)));
        assert!(t.domains.get(id).is_ok());
    }

    #[test]
    fn cascade_removes_routes_and_domain() {
        let (mut t, id) = seeded();
        let (domain, removed) = t.delete_domain_cascade(id, Utc::now()).unwrap();
        assert_eq!(domain.id(), id);
        assert_eq!(removed, 2);
        assert_eq!(t.routes_of(id).count(), 0);
        assert!(t.domains.get(id).is_err());
        assert_eq!(t.routes.all_rows().len(), 2, "route tombstones retained");
    }

    #[test]
    fn cascade_on_missing_domain_is_not_found() {
        let (mut t, _) = seeded();
        assert_eq!(
            t.delete_domain_cascade(999, Utc::now()).unwrap_err(),
            PorticoError::NotFound("Domain")
        );
        assert_eq!(t.routes.live_count(), 2);
    }

    #[test]
    fn domain_view_lists_only_live_routes() {
        let (mut t, id) = seeded();
        let first = t.routes_of(id).next().unwrap().id();
        t.routes.soft_delete(first, Utc::now()).unwrap();
        let views = t.domain_views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].routes.len(), 1);
        assert_eq!(views[0].routes[0].path, "/two");
    }

    #[test]
    fn route_view_embeds_owning_domain() {
        let (t, id) = seeded();
        let route = t.routes_of(id).next().unwrap();
        let view = t.route_view(route);
        assert_eq!(view.domain.unwrap().name, "a.test");
    }
}
