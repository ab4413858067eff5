use crate::store::EntityStore;
use portico_core::{ConfigDocument, Plugin};
use std::sync::Arc;
use tracing::debug;

/// Builds the configuration document from the live contents of the store.
#[derive(Clone)]
pub struct ConfigResolver {
    store: Arc<EntityStore>,
}

impl ConfigResolver {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    /// Resolve against a single committed snapshot, so domains, routes and
    /// plugins are always mutually consistent.
    pub fn resolve(&self) -> ConfigDocument {
        let snapshot = self.store.snapshot();
        let domains = snapshot.domain_views();
        let plugins: Vec<Plugin> = snapshot.plugins.live().cloned().collect();

        let document = ConfigDocument::resolve(&domains, &plugins);
        debug!(
            domains = document.domains.len(),
            routes = document.route_count(),
            plugins = plugins.len(),
            "config: document resolved"
        );
        document
    }
}
