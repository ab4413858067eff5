use prometheus::{Encoder, Registry, TextEncoder};

/// Render a registry in the Prometheus text exposition format.
pub fn render_metrics(registry: &Registry) -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "metrics: failed to encode registry");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
