//! The HTTP surface: axum router, handlers, and askama templates.

mod handlers;
mod routes;
pub mod templates;

pub use routes::create_router;

use crate::assets::AssetStore;
use crate::config::AppConfig;
use crate::error::Img2AltError;
use crate::ledger::LedgerStore;
use crate::orchestrate::Orchestrator;
use crate::pipeline::openrouter::{ChatApi, OpenRouterClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub ledger: Arc<LedgerStore>,
    pub assets: Arc<AssetStore>,
    pub config: AppConfig,
}

impl AppState {
    /// Wire up the stores, the chat backend, and the orchestrator.
    pub fn new(config: AppConfig) -> Result<Self, Img2AltError> {
        let ledger = Arc::new(LedgerStore::new(&config.ledger_path));
        let assets = Arc::new(AssetStore::new(&config.asset_dir)?);

        let client = OpenRouterClient::new(
            config.api_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
        .map_err(|e| Img2AltError::Internal(e.to_string()))?;
        let api: Arc<dyn ChatApi> = Arc::new(client);

        let orchestrator = Arc::new(Orchestrator::new(
            Arc::clone(&api),
            Arc::clone(&ledger),
            Arc::clone(&assets),
            config.clone(),
        ));

        Ok(Self {
            orchestrator,
            ledger,
            assets,
            config,
        })
    }
}

/// Build the application state and run the server until shutdown.
pub async fn serve(config: AppConfig) -> Result<(), Img2AltError> {
    if config.api_key.as_deref().map_or(true, |k| k.is_empty()) {
        warn!(
            "OPENROUTER_API_KEY is not set: vision calls will fail per-unit \
             and translations will be empty"
        );
    }

    let addr = config.listen_addr();
    let state = AppState::new(config)?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Img2AltError::Bind {
            addr: addr.clone(),
            source: e,
        })?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, router)
        .await
        .map_err(Img2AltError::Serve)
}
