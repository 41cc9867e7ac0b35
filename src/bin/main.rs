use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use poem::listener::TcpListener;
use report_engine::core::engine::ReportEngine;
use report_engine::settings::get_config;
use report_engine::{AppState, init_openapi_route};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config().context("failed to load configuration from environment")?;

    let log_level = Level::from_str(&config.log_level).unwrap_or(Level::DEBUG);
    // Logging to File
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(log_level)
        .init();

    tracing::info!("Initializing Report Service...");
    tracing::info!("using {} as environment variables", config.source());
    tracing::info!("run with config: {:?}", config);

    let engine = Arc::new(ReportEngine::mock(&config));

    // Init App State
    let app_state = Arc::new(AppState {
        engine,
        config: config.clone(),
    });

    tracing::info!("Report engine initialized successfully");

    let app = init_openapi_route(app_state);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await
    .context("server terminated")
}
