// HTTP server
//
// One chat endpoint plus a health probe. Request handling is stateless apart
// from reading the current scrape snapshot.

mod handlers;
pub mod types;

pub use handlers::{handle_chat, health_check};
pub use types::{ChatRequest, ChatResponse, DynamicDataStatus, HealthResponse};

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::constants::MAX_BODY_BYTES;
use crate::config::StaticContext;
use crate::providers::ChatModel;
use crate::scrape::DynamicStore;

/// Shared, read-only state for handlers
pub struct AppState {
    pub static_context: Arc<StaticContext>,
    pub dynamic: DynamicStore,
    pub model: Arc<dyn ChatModel>,
}

impl AppState {
    pub fn new(
        static_context: Arc<StaticContext>,
        dynamic: DynamicStore,
        model: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            static_context,
            dynamic,
            model,
        }
    }
}

/// Build the application router with its middleware stack.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(handle_chat))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // The frontend is served from a different origin.
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

/// Relay server: binds and serves until the process stops.
pub struct RelayServer {
    state: Arc<AppState>,
    bind_address: String,
}

impl RelayServer {
    pub fn new(state: AppState, bind_address: impl Into<String>) -> Self {
        Self {
            state: Arc::new(state),
            bind_address: bind_address.into(),
        }
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_address))?;

        let app = create_router(Arc::clone(&self.state));

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(
            model = %self.state.model.model(),
            "FURIA chat relay listening on {}",
            addr
        );

        axum::serve(listener, app).await?;
        Ok(())
    }
}
