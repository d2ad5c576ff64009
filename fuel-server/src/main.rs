use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fuel_server::config::ServerConfig;
use fuel_server::osrm::OsrmClient;
use fuel_server::overpass::OverpassClient;
use fuel_server::session::Session;
use fuel_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fuel_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let overpass = OverpassClient::new(config.overpass.clone())?;
    let osrm = OsrmClient::new(config.osrm.clone())?;
    let session = Session::new(config.search.clone());

    let state = AppState::new(overpass, osrm, session);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        overpass = %config.overpass.base_url,
        osrm = %config.osrm.base_url,
        radius_m = config.search.radius_m,
        max_stations = config.search.max_candidates,
        "Fuel Finder listening"
    );
    info!("Open http://{} in your browser", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
