use super::AdminFacade;
use portico_core::request::{CreatePluginRequest, PluginFilter, UpdatePluginRequest};
use portico_core::{Plugin, Result};
use tracing::info;

impl AdminFacade {
    pub fn list_plugins(&self, filter: &PluginFilter) -> Vec<Plugin> {
        self.store
            .snapshot()
            .plugins
            .live()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn get_plugin(&self, id: u64) -> Result<Plugin> {
        self.store.snapshot().plugins.get(id).cloned()
    }

    /// `plugin_svc_name` is informational and not checked against the
    /// plugin service table.
    pub async fn create_plugin(&self, req: CreatePluginRequest) -> Result<Plugin> {
        req.validate()?;
        let plugin = self
            .store
            .write(move |t, now| t.plugins.insert(req.into_plugin(), now))
            .await?;
        info!(
            id = plugin.meta.id,
            name = %plugin.name,
            service = %plugin.plugin_service_name,
            "plugin created"
        );
        Ok(plugin)
    }

    pub async fn update_plugin(&self, id: u64, req: UpdatePluginRequest) -> Result<Plugin> {
        req.validate()?;
        let plugin = self
            .store
            .write(move |t, now| t.plugins.update(id, now, |p| req.apply_to(p)))
            .await?;
        info!(id, name = %plugin.name, "plugin updated");
        Ok(plugin)
    }

    pub async fn delete_plugin(&self, id: u64) -> Result<Plugin> {
        let plugin = self
            .store
            .write(move |t, now| t.plugins.soft_delete(id, now))
            .await?;
        info!(id, name = %plugin.name, "plugin deleted");
        Ok(plugin)
    }
}
