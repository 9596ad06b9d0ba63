use anyhow::{Context, Result};
use meta_og_manager::config::Config;
use meta_og_manager::fixture::Fixture;
use meta_og_manager::server::{self, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("meta_og_manager=info".parse()?),
        )
        .init();

    info!("Starting metadata host");

    let config = Config::from_env()?;
    let site = config.site();
    let loaded = Fixture::from_file(&config.content_file)?.load(&site)?;

    if config.editor_api_key.is_none() {
        info!("EDITOR_API_KEY not set, editing is disabled");
    }

    let state = Arc::new(AppState::new(&config, loaded));
    state.warn_on_domain_coverage();
    let app = server::build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
