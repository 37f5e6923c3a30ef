use mesa_server::core::{Config, ServerState, server};
use mesa_server::db;
use mesa_server::utils::logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref())?;

    tracing::info!(
        environment = %config.environment,
        "starting mesa-server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let pool = db::connect(&config.database_path).await?;
    let state = ServerState::new(config, pool);

    server::run(state).await?;
    Ok(())
}
