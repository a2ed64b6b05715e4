use budget_tracker_server::{config::Config, database, routes::build_router, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let main_db = database::init_main_db(&config.data_path).await?;
    let state = AppState::new(main_db, config.data_path.clone());
    let app = build_router(
        state,
        &config.session_secret,
        config.cors_origin.as_deref(),
    )?;

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server running on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
