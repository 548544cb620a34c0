//! Kisan Agent server binary

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kisan_agent_config::load_settings;
use kisan_agent_server::{create_router, init_metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional config file path as the first argument.
    let config_path = std::env::args().nth(1);
    let settings = load_settings(config_path.as_deref())?;

    init_metrics()?;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let state = AppState::from_settings(settings)?;

    tracing::info!(%addr, "kisan-agent listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
