use anyhow::Result;
use clap::Parser;
use log::{error, info};
use prometheus::Registry;
use std::sync::Arc;
use std::time::Duration;

use token_monitor::cli::Cli;
use token_monitor::config::{Config, ProviderMode};
use token_monitor::logging;
use token_monitor::metrics::Metrics;
use token_monitor::monitor::TokenMonitorService;
use token_monitor::provider::{ClawnchProvider, DataProvider, SyntheticProvider};
use token_monitor::web::WebServer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.log_file {
        Some(path) => logging::init(path, cli.debug).expect("Failed to initialize logger"),
        None => {
            let level = if cli.debug { "debug" } else { "info" };
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
                .init();
        }
    }

    info!("Starting token monitor backend...");

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from {:?}: {}", path, e);
                return Err(anyhow::anyhow!("Configuration loading failed: {}", e));
            }
        },
        None => Config::default(),
    };
    info!("Configuration loaded successfully.");

    let host = cli.host.clone().unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);

    let provider: Arc<dyn DataProvider> = match config.provider.mode {
        ProviderMode::Synthetic => {
            Arc::new(SyntheticProvider::new(config.monitor.tokens.clone()))
        }
        ProviderMode::Clawnch => Arc::new(ClawnchProvider::new(config.provider.endpoint.clone())),
    };
    info!("Data provider initialized ({:?} mode).", config.provider.mode);

    let registry = Arc::new(Registry::new());
    let metrics = Arc::new(Metrics::new(&registry)?);

    let service = Arc::new(TokenMonitorService::new(
        provider,
        metrics.clone(),
        config.monitor.history_retention,
        config.monitor.export_history_points,
    ));

    service
        .start(Duration::from_secs(config.monitor.update_interval_secs))
        .await;
    info!("Monitoring service started.");

    let web_server = WebServer::new(
        service.clone(),
        metrics,
        registry,
        config.server.static_dir.clone().into(),
    );
    let server = web_server.start(&host, port)?;
    let server_handle = server.handle();

    {
        let service = service.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                return;
            }
            info!("Shutting down token monitor backend...");
            service.stop();
            server_handle.stop(true).await;
        });
    }

    server.await?;
    info!("Token monitor backend stopped");
    Ok(())
}
