//! HTTP API for the player collection
//!
//! Handlers are thin: they decode the request, call the listing engine or
//! the player service, and map failures onto [`ApiError`].

mod errors;
mod response;
mod routes;

pub use errors::{ApiError, ApiResult, ErrorEnvelope};
pub use response::{DataResponse, ErrorResponse, ExistsResponse, HealthResponse, SuccessResponse};
pub use routes::{health_routes, player_routes, AppState, DuplicateQuery};
