//! # HTTP Server
//!
//! Combines the player and health routers behind CORS and a request
//! timeout.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::{health_routes, player_routes, AppState};
use crate::observability::{log_event, Event};
use crate::store::LeagueStore;

use super::config::HttpServerConfig;
use super::timeout::request_timeout;

/// HTTP server for the roster API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store`
    pub fn with_config<S: LeagueStore + 'static>(config: HttpServerConfig, store: Arc<S>) -> Self {
        let state = Arc::new(AppState::new(store));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router<S: LeagueStore + 'static>(
        config: &HttpServerConfig,
        state: Arc<AppState<S>>,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(player_routes(state))
            .layer(from_fn_with_state(config.request_timeout(), request_timeout))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the listener fails
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event(Event::ServerStarted, &[("addr", &addr.to_string())]);

        axum::serve(listener, self.router).await
    }
}
