use crate::prometheus_exporter::render_metrics;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

/// Admin API metrics. All instruments are gated behind `enabled`.
///
/// A disabled collector allocates no registry; every recording call returns
/// immediately and [`AdminMetrics::render`] yields an empty body.
pub struct AdminMetrics {
    enabled: bool,
    registry: Option<Registry>,
    pub requests_total: Option<IntCounterVec>,
    pub request_duration: Option<HistogramVec>,
    pub config_renders_total: Option<IntCounter>,
    pub config_domains: Option<IntGauge>,
}

impl AdminMetrics {
    pub fn new(enabled: bool) -> anyhow::Result<Self> {
        if !enabled {
            return Ok(Self {
                enabled: false,
                registry: None,
                requests_total: None,
                request_duration: None,
                config_renders_total: None,
                config_domains: None,
            });
        }

        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("portico_admin_requests_total", "Admin API requests"),
            &["resource", "operation", "status"],
        )?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "portico_admin_request_duration_seconds",
                "Admin API request latency",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
            &["resource"],
        )?;

        let config_renders_total = IntCounter::new(
            "portico_config_renders_total",
            "Configuration documents resolved",
        )?;

        let config_domains = IntGauge::new(
            "portico_config_domains",
            "Domains in the last resolved configuration document",
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(config_renders_total.clone()))?;
        registry.register(Box::new(config_domains.clone()))?;

        Ok(Self {
            enabled: true,
            registry: Some(registry),
            requests_total: Some(requests_total),
            request_duration: Some(request_duration),
            config_renders_total: Some(config_renders_total),
            config_domains: Some(config_domains),
        })
    }

    /// Record one admin request (no-op when disabled).
    #[inline]
    pub fn record_request(&self, resource: &str, operation: &str, status: u16, duration_secs: f64) {
        if !self.enabled {
            return;
        }
        if let Some(ref counter) = self.requests_total {
            let mut buf = itoa::Buffer::new();
            let status_str = buf.format(status);
            counter
                .with_label_values(&[resource, operation, status_str])
                .inc();
        }
        if let Some(ref hist) = self.request_duration {
            hist.with_label_values(&[resource]).observe(duration_secs);
        }
    }

    /// Record one configuration document render.
    pub fn record_config_render(&self, domains: usize) {
        if let Some(ref counter) = self.config_renders_total {
            counter.inc();
        }
        if let Some(ref gauge) = self.config_domains {
            gauge.set(i64::try_from(domains).unwrap_or(i64::MAX));
        }
    }

    /// Prometheus text exposition of every instrument.
    pub fn render(&self) -> String {
        self.registry.as_ref().map(render_metrics).unwrap_or_default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
