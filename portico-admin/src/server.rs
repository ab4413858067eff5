use crate::facade::AdminFacade;
use crate::handlers;
use crate::middleware::track_metrics;
use anyhow::Context;
use axum::Router;
use axum::http::HeaderValue;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use portico_core::config::CorsConfig;
use portico_observability::AdminMetrics;
use portico_store::{ConfigResolver, EntityStore};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared state for the Admin API.
pub struct AdminState {
    pub facade: AdminFacade,
    pub resolver: ConfigResolver,
    pub metrics: Arc<AdminMetrics>,
    pub cors: CorsConfig,
}

impl AdminState {
    pub fn new(store: Arc<EntityStore>, metrics: Arc<AdminMetrics>, cors: CorsConfig) -> Self {
        Self {
            facade: AdminFacade::new(Arc::clone(&store)),
            resolver: ConfigResolver::new(store),
            metrics,
            cors,
        }
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let list: Vec<HeaderValue> = config
            .allow_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %origin, "admin: ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age_secs))
}

/// Build the Axum router with all admin routes.
pub fn build_admin_router(state: Arc<AdminState>) -> Router {
    let api = Router::new()
        // Domains
        .route(
            "/domains",
            get(handlers::domains::list_domains).post(handlers::domains::create_domain),
        )
        .route(
            "/domains/{id}",
            get(handlers::domains::get_domain)
                .put(handlers::domains::update_domain)
                .delete(handlers::domains::delete_domain),
        )
        // Routes
        .route(
            "/routes",
            get(handlers::routes::list_routes).post(handlers::routes::create_route),
        )
        .route(
            "/routes/{id}",
            get(handlers::routes::get_route)
                .put(handlers::routes::update_route)
                .delete(handlers::routes::delete_route),
        )
        .route("/routes/{id}/plugins", put(handlers::routes::update_route_plugins))
        // Plugins
        .route(
            "/plugins",
            get(handlers::plugins::list_plugins).post(handlers::plugins::create_plugin),
        )
        .route(
            "/plugins/{id}",
            get(handlers::plugins::get_plugin)
                .put(handlers::plugins::update_plugin)
                .delete(handlers::plugins::delete_plugin),
        )
        // Plugin services
        .route(
            "/plugin-services",
            get(handlers::plugin_services::list_plugin_services)
                .post(handlers::plugin_services::create_plugin_service),
        )
        .route(
            "/plugin-services/{id}",
            get(handlers::plugin_services::get_plugin_service)
                .put(handlers::plugin_services::update_plugin_service)
                .delete(handlers::plugin_services::delete_plugin_service),
        )
        // Resolved configuration
        .route("/config", get(handlers::config::get_config))
        .route_layer(from_fn_with_state(Arc::clone(&state), track_metrics));

    Router::new()
        .merge(api)
        .route("/healthz", get(handlers::health::health_check))
        .route("/metrics", get(handlers::config::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.cors))
        .with_state(state)
}

/// Serve the admin API until `shutdown` resolves.
pub async fn start_admin<F>(addr: &str, state: Arc<AdminState>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_admin_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind admin listener on {addr}"))?;

    info!(addr = %addr, "admin API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("admin API server failed")?;
    info!("admin API stopped");
    Ok(())
}
