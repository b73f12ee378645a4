use std::{net::SocketAddr, sync::Arc};

use mockable::DefaultClock;
use offpath::server::{config::Config, model::app::AppState, router, startup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    startup::prepare_upload_directory(&config.upload_directory).await?;
    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&config).await?;

    let state = AppState {
        db,
        clock: Arc::new(DefaultClock),
        game: Arc::new(config.game),
        upload_directory: Arc::new(config.upload_directory),
    };

    let app = router::routes().with_state(state).layer(session);

    let addr: SocketAddr = config.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Starting server on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
