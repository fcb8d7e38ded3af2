use tracing::info;

use taskboard::api::router;
use taskboard::config::ServerConfig;
use taskboard::state::AppState;
use taskboard::{db, logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init("taskboard=debug");

    let config = ServerConfig::new_from_env()?;
    let pool = db::connect(&config.database_url).await?;

    let state = AppState { db: pool.clone() };

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
