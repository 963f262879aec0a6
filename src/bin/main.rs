use poem::listener::TcpListener;
use progress_bars::settings::get_config;
use progress_bars::{AppState, init_openapi_route};

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config()?;

    // Logging to File
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.level())
        .init();

    tracing::info!("Initializing Progress Bar Service...");
    tracing::info!("run with config: {:?}", config);

    // Init App State
    let app_state = Arc::new(AppState {
        config: config.clone(),
    });

    let app = init_openapi_route(app_state, &config);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await?;

    Ok(())
}
