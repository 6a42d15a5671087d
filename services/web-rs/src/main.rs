use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use web_rs::{config, metrics, router, state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = config::Config::from_env()?;
    tracing::info!(app = %config.app_name, env = %config.app_env, "starting web-rs");

    // Prometheus
    let registry = Registry::new();
    let app_metrics = metrics::init(&registry);

    let addr = config.bind_addr.clone();
    let state = state::AppState::new(config, app_metrics, registry);
    let app = router(state);

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
