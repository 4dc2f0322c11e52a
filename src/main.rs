use anyhow::Context;
use tracing_subscriber::EnvFilter;

use review_hub_api::api::{create_router, AppState};
use review_hub_api::config::Config;
use review_hub_api::services::ingest;
use review_hub_api::services::providers::JsonDataset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Bootstrap the feed: demo seed first, then the configured dataset
    let mut reviews = if config.seed_demo_data {
        ingest::demo_reviews()
    } else {
        Vec::new()
    };

    if let Some(path) = &config.dataset_path {
        let dataset = JsonDataset::new(path);
        let loaded = ingest::load_from_source(&dataset, &reviews)
            .await
            .with_context(|| format!("failed to load dataset from {}", path.display()))?;
        reviews.extend(loaded);
    }

    tracing::info!(reviews = reviews.len(), "Review feed ready");

    let state = AppState::with_reviews(reviews);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
