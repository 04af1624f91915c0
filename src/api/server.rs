//! # HTTP Server
//!
//! Router assembly and the serving loop. All endpoint routers are nested
//! under `/api`, with cross-origin requests permitted from any origin.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Store;

use super::config::ServerConfig;
use super::report_routes::report_routes;
use super::roster_routes::roster_routes;
use super::session_routes::session_routes;
use super::ApiState;

/// Build the full application router over an opened store.
///
/// An empty `cors_origins` list permits any origin; a non-empty list
/// restricts cross-origin requests to the parseable entries.
pub fn build_router(store: Store, cors_origins: &[String]) -> Router {
    let state = Arc::new(ApiState { store });

    let api = Router::new()
        .merge(roster_routes(state.clone()))
        .merge(session_routes(state.clone()))
        .merge(report_routes(state));

    let cors = if cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = cors_origins.iter().filter_map(|s| s.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is terminated.
pub async fn serve(config: &ServerConfig, store: Store) -> std::io::Result<()> {
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let router = build_router(store, &config.cors_origins);

    info!(addr = %addr, "starting tutorlog HTTP server");
    info!("API available at http://{}/api", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds() {
        let store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        let _router = build_router(store, &[]);
        // If we get here, router construction succeeded
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        let origins = vec!["http://localhost:5173".to_string()];
        let _router = build_router(store, &origins);
    }
}
