use prometheus::Registry;
use std::sync::Arc;

use crate::{
    config::Config,
    enums::HealthStatus,
    gateway::{DemoGateway, GatewayClient, LinkGateway},
    metrics::AppMetrics,
};

/// Shared application state injected into every handler via axum State extractor.
pub struct AppState {
    pub config: Config,
    pub gateway: Arc<dyn LinkGateway>,
    /// Whether a live gateway or demo data backs the page.
    pub gateway_status: HealthStatus,
    pub metrics: &'static AppMetrics,
    pub registry: Registry,
}

impl AppState {
    /// A configured gateway URL wins over demo mode. With neither, the client is
    /// still built and every call reports the missing configuration.
    pub fn new(config: Config, metrics: &'static AppMetrics, registry: Registry) -> Arc<Self> {
        let (gateway, gateway_status): (Arc<dyn LinkGateway>, HealthStatus) =
            match config.gateway_base_url() {
                Some(base) => (
                    Arc::new(GatewayClient::new(Some(base)).with_metrics(metrics)),
                    HealthStatus::Healthy,
                ),
                None if config.demo_mode => (Arc::new(DemoGateway::new()), HealthStatus::Healthy),
                None => (
                    Arc::new(GatewayClient::new(None).with_metrics(metrics)),
                    HealthStatus::Unhealthy,
                ),
            };
        tracing::info!(gateway = gateway.name(), status = ?gateway_status, "gateway selected");
        Self::with_gateway(config, gateway, gateway_status, metrics, registry)
    }

    pub fn with_gateway(
        config: Config,
        gateway: Arc<dyn LinkGateway>,
        gateway_status: HealthStatus,
        metrics: &'static AppMetrics,
        registry: Registry,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            gateway,
            gateway_status,
            metrics,
            registry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        envy::from_iter(vars.iter().map(|(k, v)| (k.to_string(), v.to_string()))).unwrap()
    }

    fn state(vars: &[(&str, &str)]) -> Arc<AppState> {
        let registry = Registry::new();
        let metrics = crate::metrics::init(&registry);
        AppState::new(config(vars), metrics, registry)
    }

    #[test]
    fn configured_url_selects_http_client() {
        let state = state(&[("API_GATEWAY_URL", "https://gw.example/"), ("DEMO_MODE", "true")]);
        assert_eq!(state.gateway.name(), "gateway");
        assert_eq!(state.gateway_status, HealthStatus::Healthy);
    }

    #[test]
    fn demo_mode_without_url_uses_demo_data() {
        let state = state(&[("DEMO_MODE", "true")]);
        assert_eq!(state.gateway.name(), "demo");
        assert_eq!(state.gateway_status, HealthStatus::Healthy);
    }

    #[test]
    fn nothing_configured_is_unhealthy() {
        let state = state(&[("API_GATEWAY_URL", "   ")]);
        assert_eq!(state.gateway.name(), "gateway");
        assert_eq!(state.gateway_status, HealthStatus::Unhealthy);
    }
}
