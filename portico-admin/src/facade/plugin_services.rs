use super::AdminFacade;
use portico_core::request::{
    CreatePluginServiceRequest, PluginServiceFilter, UpdatePluginServiceRequest,
};
use portico_core::{PluginService, Result};
use tracing::info;

impl AdminFacade {
    pub fn list_plugin_services(&self, filter: &PluginServiceFilter) -> Vec<PluginService> {
        self.store
            .snapshot()
            .plugin_services
            .live()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect()
    }

    pub fn get_plugin_service(&self, id: u64) -> Result<PluginService> {
        self.store.snapshot().plugin_services.get(id).cloned()
    }

    pub async fn create_plugin_service(
        &self,
        req: CreatePluginServiceRequest,
    ) -> Result<PluginService> {
        req.validate()?;
        let service = self
            .store
            .write(move |t, now| t.plugin_services.insert(req.into_plugin_service(), now))
            .await?;
        info!(id = service.meta.id, name = %service.name, "plugin service created");
        Ok(service)
    }

    pub async fn update_plugin_service(
        &self,
        id: u64,
        req: UpdatePluginServiceRequest,
    ) -> Result<PluginService> {
        req.validate()?;
        let service = self
            .store
            .write(move |t, now| t.plugin_services.update(id, now, |s| req.apply_to(s)))
            .await?;
        info!(id, name = %service.name, "plugin service updated");
        Ok(service)
    }

    pub async fn delete_plugin_service(&self, id: u64) -> Result<PluginService> {
        let service = self
            .store
            .write(move |t, now| t.plugin_services.soft_delete(id, now))
            .await?;
        info!(id, name = %service.name, "plugin service deleted");
        Ok(service)
    }
}
