//! Search endpoint and search page
//!
//! - `GET /search?q=..[&caseSensitive=..][&maxResults=..]`: JSON array of
//!   context windows around each match in the corpus
//! - `GET /`: the search page, rendered with results through the search
//!   controller when a query is present

pub mod backend;
pub mod corpus;
pub mod error;
pub mod handlers;
pub mod page;
pub mod suffix;

#[cfg(test)]
mod tests;

use crate::config::ServerConfig;
use crate::controller::HighlightMode;
use axum::routing::get;
use axum::Router;
use backend::LocalBackend;
use corpus::Corpus;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Corpus>,
    pub highlight_mode: HighlightMode,
}

impl AppState {
    pub fn new(corpus: Corpus, highlight_mode: HighlightMode) -> Self {
        Self {
            corpus: Arc::new(corpus),
            highlight_mode,
        }
    }

    pub fn backend(&self) -> LocalBackend {
        LocalBackend::new(self.corpus.clone())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/search", get(handlers::handle_search))
        .with_state(state)
}

/// Load the corpus and serve until Ctrl+C
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    info!("Loading corpus from {}", config.corpus_path.display());
    let corpus = Corpus::load(&config.corpus_path).map_err(crate::error::AppError::from)?;

    let app = router(AppState::new(corpus, config.highlight_mode));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
