use super::AdminFacade;
use portico_core::request::{CreateDomainRequest, DomainFilter, UpdateDomainRequest};
use portico_core::{Domain, DomainView, Result};
use tracing::info;

impl AdminFacade {
    /// Live domains matching `filter`, each with its live routes.
    pub fn list_domains(&self, filter: &DomainFilter) -> Vec<DomainView> {
        let snapshot = self.store.snapshot();
        snapshot
            .domains
            .live()
            .filter(|d| filter.matches(d))
            .map(|d| snapshot.domain_view(d))
            .collect()
    }

    pub fn get_domain(&self, id: u64) -> Result<DomainView> {
        let snapshot = self.store.snapshot();
        let domain = snapshot.domains.get(id)?;
        Ok(snapshot.domain_view(domain))
    }

    /// A new domain owns no routes yet, so its view carries an empty list.
    pub async fn create_domain(&self, req: CreateDomainRequest) -> Result<DomainView> {
        req.validate()?;
        let view = self
            .store
            .write(move |t, now| {
                let domain = t.domains.insert(req.into_domain(), now)?;
                Ok(DomainView::new(domain, Vec::new()))
            })
            .await?;
        info!(id = view.domain.meta.id, name = %view.domain.name, "domain created");
        Ok(view)
    }

    pub async fn update_domain(&self, id: u64, req: UpdateDomainRequest) -> Result<DomainView> {
        req.validate()?;
        let view = self
            .store
            .write(move |t, now| {
                let domain = t.domains.update(id, now, |d| req.apply_to(d))?;
                Ok(t.domain_view(&domain))
            })
            .await?;
        info!(id, name = %view.domain.name, "domain updated");
        Ok(view)
    }

    /// Soft-delete a domain and every live route it owns, atomically.
    pub async fn delete_domain(&self, id: u64) -> Result<Domain> {
        let (domain, routes) = self
            .store
            .write(move |t, now| t.delete_domain_cascade(id, now))
            .await?;
        info!(id, name = %domain.name, routes, "domain deleted");
        Ok(domain)
    }
}
