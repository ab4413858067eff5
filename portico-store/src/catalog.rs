//! Built-in plugin service catalog and its startup seeder.

use crate::store::EntityStore;
use portico_core::{PluginService, PorticoError, Result};
use tracing::{error, info};

/// `(name, base_config)` for every plugin service shipped with Portico.
pub const BUILTIN_PLUGIN_SERVICES: &[(&str, &str)] = &[
    ("auth", r#"{"auth_user":"admin","auth_pass":"password"}"#),
    (
        "cors",
        r#"{"cors_origin":"*","cors_methods":"GET,POST","cors_headers":"Content-Type,Authorization"}"#,
    ),
    ("ratelimit", r#"{"rate_limit":60,"rate_window":60}"#),
    ("ipwhitelist", r#"{"whitelist_ips":"127.0.0.1,192.168.1.0/24"}"#),
    ("jwt", r#"{"jwt_secret":"mysecret"}"#),
    ("logging", r#"{"log_level":"info"}"#),
];

/// Outcome of one seeding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub existing: usize,
}

/// Insert every catalog entry that has no live plugin service of the same
/// name.
///
/// Each entry is one store write, so the existence check and the insert
/// cannot race with another seeder. A failing entry is logged and the rest
/// are still attempted; the run then fails with `StorageFault`.
pub async fn seed_plugin_services(store: &EntityStore) -> Result<SeedReport> {
    let mut report = SeedReport::default();
    let mut failed = Vec::new();

    for &(name, base_config) in BUILTIN_PLUGIN_SERVICES {
        let outcome = store
            .write(|tables, now| {
                if tables.plugin_services.find_by_key(name).is_some() {
                    return Ok(false);
                }
                tables
                    .plugin_services
                    .insert(PluginService::new(name, base_config), now)?;
                Ok(true)
            })
            .await;

        match outcome {
            Ok(true) => {
                info!(name, "seed: plugin service created");
                report.inserted += 1;
            }
            Ok(false) => report.existing += 1,
            Err(e) if e.is_conflict() => report.existing += 1,
            Err(e) => {
                error!(name, error = %e, "seed: failed to create plugin service");
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        return Err(PorticoError::StorageFault(format!(
            "failed to seed plugin services: {}",
            failed.join(", ")
        )));
    }

    info!(
        inserted = report.inserted,
        existing = report.existing,
        "seed: plugin catalog ready"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Persistence;
    use crate::tables::Tables;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct ReadOnlyDisk;

    #[async_trait]
    impl Persistence for ReadOnlyDisk {
        async fn load(&self) -> Result<Option<Tables>> {
            Ok(None)
        }

        async fn save(&self, _tables: &Tables) -> Result<()> {
            Err(PorticoError::StorageFault("read-only file system".into()))
        }
    }

    #[tokio::test]
    async fn first_run_inserts_whole_catalog() {
        let store = EntityStore::in_memory();
        let report = seed_plugin_services(&store).await.unwrap();
        assert_eq!(report.inserted, BUILTIN_PLUGIN_SERVICES.len());
        assert_eq!(report.existing, 0);

        let snap = store.snapshot();
        let jwt = snap.plugin_services.find_by_key("jwt").unwrap();
        assert_eq!(jwt.base_config, r#"{"jwt_secret":"mysecret"}"#);
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let store = EntityStore::in_memory();
        seed_plugin_services(&store).await.unwrap();
        let report = seed_plugin_services(&store).await.unwrap();
        assert_eq!(report.inserted, 0);
        assert_eq!(report.existing, BUILTIN_PLUGIN_SERVICES.len());
        assert_eq!(
            store.snapshot().plugin_services.live_count(),
            BUILTIN_PLUGIN_SERVICES.len()
        );
    }

    #[tokio::test]
    async fn concurrent_runs_insert_each_name_once() {
        let store = Arc::new(EntityStore::in_memory());
        let a = tokio::spawn({
            let store = Arc::clone(&store);
            async move { seed_plugin_services(&store).await }
        });
        let b = tokio::spawn({
            let store = Arc::clone(&store);
            async move { seed_plugin_services(&store).await }
        });
        let (ra, rb) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());
        assert_eq!(ra.inserted + rb.inserted, BUILTIN_PLUGIN_SERVICES.len());
        assert_eq!(
            store.snapshot().plugin_services.all_rows().len(),
            BUILTIN_PLUGIN_SERVICES.len()
        );
    }

    #[tokio::test]
    async fn custom_service_with_other_config_is_left_alone() {
        let store = EntityStore::in_memory();
        store
            .write(|t, now| {
                t.plugin_services
                    .insert(PluginService::new("cors", r#"{"cors_origin":"https://a.test"}"#), now)
            })
            .await
            .unwrap();

        let report = seed_plugin_services(&store).await.unwrap();
        assert_eq!(report.existing, 1);
        let snap = store.snapshot();
        let cors = snap.plugin_services.find_by_key("cors").unwrap();
        assert_eq!(cors.base_config, r#"{"cors_origin":"https://a.test"}"#);
    }

    #[tokio::test]
    async fn soft_deleted_entry_is_reseeded() {
        let store = EntityStore::in_memory();
        seed_plugin_services(&store).await.unwrap();
        let id = store.snapshot().plugin_services.find_by_key("auth").unwrap().meta.id;
        store
            .write(move |t, now| t.plugin_services.soft_delete(id, now))
            .await
            .unwrap();

        let report = seed_plugin_services(&store).await.unwrap();
        assert_eq!(report.inserted, 1);
        assert!(store.snapshot().plugin_services.find_by_key("auth").is_some());
    }

    #[tokio::test]
    async fn storage_failure_attempts_every_entry_then_aborts() {
        let store = EntityStore::open(Arc::new(ReadOnlyDisk)).await.unwrap();
        let err = seed_plugin_services(&store).await.unwrap_err();
        match err {
            PorticoError::StorageFault(msg) => {
                for (name, _) in BUILTIN_PLUGIN_SERVICES {
                    assert!(msg.contains(name), "{msg} should name {name}");
                }
            }
            other => panic!("expected StorageFault, got {other:?}"),
        }
        assert_eq!(store.snapshot().plugin_services.live_count(), 0);
    }
}
