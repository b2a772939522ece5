//! league-roster - Player listing and roster service for a sports league
//!
//! The listing engine joins players with their club, country and position,
//! derives age and ratings at query time, then filters, sorts and
//! paginates. A small write path creates and updates players.

pub mod api;
pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod players;
pub mod query;
pub mod store;
