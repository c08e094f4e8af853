use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;

pub use state::{rewrite_path, ProxyState, DEFAULT_PREFIX};

/// Development proxy: `GET <prefix>/...` is forwarded to the backend with the prefix removed
pub fn create_app(state: ProxyState) -> Router {
    let cors = CorsLayer::permissive();
    let prefix = state.prefix.trim_end_matches('/').to_string();

    Router::new()
        .route(&prefix, get(handlers::forward))
        .route(&format!("{}/*path", prefix), get(handlers::forward))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: ProxyState) -> td_core::Result<()> {
    info!("API target: {}", state.target);
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Proxy listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, ProxyState};
    pub use td_core::{Error, Result};
}
