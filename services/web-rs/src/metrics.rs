use prometheus::{IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

pub struct AppMetrics {
    pub gateway_requests_total: IntCounterVec,
    pub panel_failures_total: IntCounterVec,
    pub http_requests_total: IntCounterVec,
}

static METRICS: OnceLock<AppMetrics> = OnceLock::new();

pub fn init(registry: &Registry) -> &'static AppMetrics {
    let metrics = METRICS.get_or_init(|| {
        let gateway_reqs = IntCounterVec::new(
            Opts::new(
                "web_gateway_requests_total",
                "Gateway calls from web-rs by operation and outcome",
            ),
            &["operation", "outcome"],
        )
        .expect("valid gateway_requests_total opts");
        let panel_failures = IntCounterVec::new(
            Opts::new("web_panel_failures_total", "Panels that ended in the failed state"),
            &["panel"],
        )
        .expect("valid panel_failures_total opts");
        let http_reqs = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests by handler and status"),
            &["handler", "method", "status_code"],
        )
        .expect("valid http_requests_total opts");

        AppMetrics {
            gateway_requests_total: gateway_reqs,
            panel_failures_total: panel_failures,
            http_requests_total: http_reqs,
        }
    });

    // Registration is per registry; a second registry (tests) gets the same collectors.
    registry
        .register(Box::new(metrics.gateway_requests_total.clone()))
        .ok();
    registry
        .register(Box::new(metrics.panel_failures_total.clone()))
        .ok();
    registry
        .register(Box::new(metrics.http_requests_total.clone()))
        .ok();
    metrics
}

pub fn gather(registry: &Registry) -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&registry.gather(), &mut buf) {
        tracing::warn!("metrics encode failed: {e}");
    }
    String::from_utf8(buf).unwrap_or_default()
}
