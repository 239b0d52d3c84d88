use anyhow::Context;
use poc_pool_server::shared::LoggingUtils;
use poc_pool_server::{AppConfig, HttpServer};
use tracing::{error, info};

fn main() {
    if let Err(e) = start() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn start() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    LoggingUtils::initialize(&config.logging.level, &config.logging.format)
        .context("Failed to initialize logging")?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if config.server.worker_threads > 0 {
        runtime.worker_threads(config.server.worker_threads);
    }
    let runtime = runtime.build().context("Failed to start async runtime")?;

    runtime.block_on(serve(config))
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting pool server...");
    info!(
        pool = %config.pool.name,
        account = %config.pool.pool_account(),
        "Configuration loaded successfully"
    );

    let server = HttpServer::new(config)
        .await
        .context("Failed to initialize server")?;

    info!("Server starting on {}", server.config().server_address());
    server.run().await.context("Server error")?;

    Ok(())
}
