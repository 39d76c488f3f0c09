use anyhow::Context;
use social::config::AppConfig;
use social::server::ServerBuilder;
use social::storage::InMemorySocialStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        default_page_size = config.pagination.default_page_size,
        max_page_size = config.pagination.max_page_size,
        "starting social API"
    );

    ServerBuilder::new()
        .with_config(config)
        .with_store(InMemorySocialStore::new())
        .serve()
        .await
}
