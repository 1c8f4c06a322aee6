use flightbooker_api::{app, AppState};
use flightbooker_store::Config;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flightbooker_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting FlightBooker API on port {}", config.server.port);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let state = AppState::with_mock_data(config)?;
    state.spawn_eviction(Duration::from_secs(60));
    let app = app(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
