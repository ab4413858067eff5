pub mod metrics;
pub mod prometheus_exporter;

pub use metrics::AdminMetrics;
pub use prometheus_exporter::render_metrics;
