use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ars_dialog::gateway::RapidProGateway;
use ars_dialog::settings::SharedSettings;
use ars_server::config::ServerConfig;
use ars_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServerConfig::from_env();
    let settings = SharedSettings::new(config.gateway.clone());
    let gateway = Arc::new(RapidProGateway::new(
        settings.clone(),
        config.delivery_timeout,
    ));

    let state = AppState::in_memory(settings, gateway, config.delivery_timeout);
    let app = ars_server::app(state, &config);

    let listener = TcpListener::bind(&config.bind).await?;
    tracing::info!(
        bind = %config.bind,
        time_zone = %config.gateway.time_zone,
        rapid_pro_url = %config.gateway.rapid_pro_url,
        "ars-server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
