use std::net::SocketAddr;
use std::sync::Arc;
use coach_api::{app, AppState};
use coach_store::{Config, HttpGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coach_api=debug,coach_session=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting coach booking API on port {}", config.server.port);
    tracing::info!("Ticketing backend at {}", config.gateway.base_url);

    let gateway = HttpGateway::new(&config.gateway)?;
    let app_state = AppState::new(Arc::new(gateway), config.business_rules.clone());

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
