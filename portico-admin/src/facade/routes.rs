use super::AdminFacade;
use portico_core::request::{
    CreateRouteRequest, RouteFilter, UpdateRoutePluginRequest, UpdateRouteRequest,
};
use portico_core::{PorticoError, Result, Route, RouteView};
use portico_store::Tables;
use tracing::info;

/// The referenced domain must be live.
fn ensure_domain(tables: &Tables, domain_id: u64) -> Result<()> {
    tables
        .domains
        .get(domain_id)
        .map(|_| ())
        .map_err(|_| PorticoError::InvalidReference("Domain not found".into()))
}

impl AdminFacade {
    /// Live routes matching `filter`, each with its domain.
    pub fn list_routes(&self, filter: &RouteFilter) -> Vec<RouteView> {
        let snapshot = self.store.snapshot();
        snapshot
            .routes
            .live()
            .filter(|r| filter.matches(r))
            .map(|r| snapshot.route_view(r))
            .collect()
    }

    pub fn get_route(&self, id: u64) -> Result<RouteView> {
        let snapshot = self.store.snapshot();
        let route = snapshot.routes.get(id)?;
        Ok(snapshot.route_view(route))
    }

    pub async fn create_route(&self, req: CreateRouteRequest) -> Result<RouteView> {
        req.validate()?;
        let view = self
            .store
            .write(move |t, now| {
                ensure_domain(t, req.domain_id)?;
                let route = t.routes.insert(req.into_route(), now)?;
                Ok(t.route_view(&route))
            })
            .await?;
        info!(
            id = view.route.meta.id,
            domain_id = view.route.domain_id,
            path = %view.route.path,
            "route created"
        );
        Ok(view)
    }

    pub async fn update_route(&self, id: u64, req: UpdateRouteRequest) -> Result<RouteView> {
        req.validate()?;
        let view = self
            .store
            .write(move |t, now| {
                t.routes.get(id)?;
                if let Some(domain_id) = req.target_domain() {
                    ensure_domain(t, domain_id)?;
                }
                let route = t.routes.update(id, now, |r| req.apply_to(r))?;
                Ok(t.route_view(&route))
            })
            .await?;
        info!(id, path = %view.route.path, "route updated");
        Ok(view)
    }

    /// Replace only the plugin spec. `None` leaves it as is, `""` clears it.
    pub async fn update_route_plugins(
        &self,
        id: u64,
        req: UpdateRoutePluginRequest,
    ) -> Result<RouteView> {
        req.validate()?;
        let view = self
            .store
            .write(move |t, now| {
                let route = t.routes.update(id, now, |r| req.apply_to(r))?;
                Ok(t.route_view(&route))
            })
            .await?;
        info!(id, plugin = %view.route.plugin_spec, "route plugins updated");
        Ok(view)
    }

    pub async fn delete_route(&self, id: u64) -> Result<Route> {
        let route = self
            .store
            .write(move |t, now| t.routes.soft_delete(id, now))
            .await?;
        info!(id, "route deleted");
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::request::CreateDomainRequest;
    use portico_store::EntityStore;
    use std::sync::Arc;

    async fn facade_with_domain() -> (AdminFacade, u64) {
        let f = AdminFacade::new(Arc::new(EntityStore::in_memory()));
        let d = f
            .create_domain(CreateDomainRequest {
                name: "api.test".into(),
                user_id: "u".into(),
            })
            .await
            .unwrap();
        (f, d.domain.meta.id)
    }

    fn create(domain_id: u64) -> CreateRouteRequest {
        CreateRouteRequest {
            path: "/old".into(),
            upstream: "http://up:8080".into(),
            plugin: "jwt".into(),
            domain_id,
            use_path_as_prefix: true,
        }
    }

    #[tokio::test]
    async fn create_with_unknown_domain_persists_nothing() {
        let (f, _) = facade_with_domain().await;
        let err = f.create_route(create(999)).await.unwrap_err();
        assert_eq!(err, PorticoError::InvalidReference("Domain not found".into()));
        assert!(f.list_routes(&RouteFilter::default()).is_empty());
    }

    #[tokio::test]
    async fn create_embeds_domain() {
        let (f, domain_id) = facade_with_domain().await;
        let view = f.create_route(create(domain_id)).await.unwrap();
        assert_eq!(view.domain.unwrap().name, "api.test");
        assert!(view.route.use_path_as_prefix);
    }

    #[tokio::test]
    async fn partial_update_touches_only_supplied_fields() {
        let (f, domain_id) = facade_with_domain().await;
        let created = f.create_route(create(domain_id)).await.unwrap();
        let id = created.route.meta.id;

        let req = UpdateRouteRequest {
            path: Some("/new".into()),
            ..Default::default()
        };
        let updated = f.update_route(id, req).await.unwrap().route;
        assert_eq!(updated.path, "/new");
        assert_eq!(updated.upstream_url, "http://up:8080");
        assert_eq!(updated.plugin_spec, "jwt");
        assert_eq!(updated.domain_id, domain_id);
        assert!(updated.use_path_as_prefix);
    }

    #[tokio::test]
    async fn update_to_unknown_domain_is_invalid_reference() {
        let (f, domain_id) = facade_with_domain().await;
        let id = f.create_route(create(domain_id)).await.unwrap().route.meta.id;
        let req = UpdateRouteRequest {
            domain_id: Some(42),
            ..Default::default()
        };
        assert!(matches!(
            f.update_route(id, req).await,
            Err(PorticoError::InvalidReference(_))
        ));
        assert_eq!(f.get_route(id).unwrap().route.domain_id, domain_id);
    }

    #[tokio::test]
    async fn update_missing_route_is_not_found_even_with_bad_domain() {
        let (f, _) = facade_with_domain().await;
        let req = UpdateRouteRequest {
            domain_id: Some(42),
            ..Default::default()
        };
        assert_eq!(
            f.update_route(7, req).await.unwrap_err(),
            PorticoError::NotFound("Route")
        );
    }

    #[tokio::test]
    async fn plugin_spec_can_be_cleared() {
        let (f, domain_id) = facade_with_domain().await;
        let id = f.create_route(create(domain_id)).await.unwrap().route.meta.id;

        let kept = f
            .update_route_plugins(id, UpdateRoutePluginRequest { plugins: None })
            .await
            .unwrap();
        assert_eq!(kept.route.plugin_spec, "jwt");

        let cleared = f
            .update_route_plugins(id, UpdateRoutePluginRequest { plugins: Some(String::new()) })
            .await
            .unwrap();
        assert_eq!(cleared.route.plugin_spec, "");
    }

    #[tokio::test]
    async fn list_filters_by_domain_and_path() {
        let (f, domain_id) = facade_with_domain().await;
        f.create_route(create(domain_id)).await.unwrap();
        let mut other = create(domain_id);
        other.path = "/health".into();
        f.create_route(other).await.unwrap();

        let by_path = RouteFilter {
            domain_id: None,
            path: Some("heal".into()),
        };
        assert_eq!(f.list_routes(&by_path).len(), 1);

        let unparsable = RouteFilter {
            domain_id: Some("abc".into()),
            path: None,
        };
        assert_eq!(f.list_routes(&unparsable).len(), 2);

        let other_domain = RouteFilter {
            domain_id: Some((domain_id + 1).to_string()),
            path: None,
        };
        assert!(f.list_routes(&other_domain).is_empty());
    }

    #[tokio::test]
    async fn deleted_route_is_gone() {
        let (f, domain_id) = facade_with_domain().await;
        let id = f.create_route(create(domain_id)).await.unwrap().route.meta.id;
        f.delete_route(id).await.unwrap();
        assert_eq!(f.get_route(id).unwrap_err(), PorticoError::NotFound("Route"));
        assert_eq!(f.delete_route(id).await.unwrap_err(), PorticoError::NotFound("Route"));
    }
}
