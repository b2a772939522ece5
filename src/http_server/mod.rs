//! # HTTP Server Module
//!
//! Axum server exposing the roster API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/players` - Listing and creation
//! - `/players/check-duplicate` - Duplicate lookup
//! - `/players/:id` - Update

pub mod config;
pub mod server;
mod timeout;

pub use config::HttpServerConfig;
pub use server::HttpServer;
