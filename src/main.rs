/// API сервер портфеля проектов

use std::sync::Arc;

use anyhow::Context;

use portfolio_engine::{
    api::{router, AppState},
    assistant::{HttpTextGenerator, TextGenerator, UnavailableGenerator},
    config::AppConfig,
    store::{MemoryProjectStore, ProjectStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn ProjectStore> = match &config.seed_path {
        Some(path) => Arc::new(MemoryProjectStore::from_json_file(path)?),
        None => Arc::new(MemoryProjectStore::new()),
    };

    let generator: Arc<dyn TextGenerator> = match &config.llm {
        Some(llm) => {
            tracing::info!("Text generation via {} ({})", llm.endpoint, llm.model);
            Arc::new(HttpTextGenerator::new(llm.clone())?)
        }
        None => {
            tracing::warn!("PORTFOLIO_LLM_ENDPOINT is not set, comparison analysis is disabled");
            Arc::new(UnavailableGenerator)
        }
    };

    let app = router(AppState::new(store, generator));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("Server listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
