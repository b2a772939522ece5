//! Player HTTP Routes
//!
//! - `GET /players` - paginated listing
//! - `POST /players` - create
//! - `GET /players/check-duplicate` - name + date of birth lookup
//! - `PUT /players/:id` - update
//! - `GET /health` - health check

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::model::Player;
use crate::observability::{log_event, Event};
use crate::players::{NewPlayer, PlayerDetails, PlayerService, PlayerUpdate};
use crate::query::{ListPlayersParams, ListingEngine, PlayerPage};
use crate::store::LeagueStore;

use super::errors::{ApiError, ApiResult};
use super::response::{DataResponse, ExistsResponse, HealthResponse};

// ==================
// Shared State
// ==================

/// State shared across player handlers
pub struct AppState<S: LeagueStore> {
    pub engine: ListingEngine<S>,
    pub players: PlayerService<S>,
}

impl<S: LeagueStore> AppState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            engine: ListingEngine::new(Arc::clone(&store)),
            players: PlayerService::new(store),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateQuery {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
}

// ==================
// Routes
// ==================

/// Create player routes
pub fn player_routes<S: LeagueStore + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route(
            "/players",
            get(list_players_handler::<S>).post(create_player_handler::<S>),
        )
        .route("/players/check-duplicate", get(check_duplicate_handler::<S>))
        .route("/players/:id", put(update_player_handler::<S>))
        .with_state(state)
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

// ==================
// Handlers
// ==================

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn list_players_handler<S: LeagueStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<PlayerPage>> {
    let Query(raw) = query.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let params = ListPlayersParams::parse(&raw).map_err(|e| {
        log_event(Event::ListingRejected, &[("reason", &e.to_string())]);
        ApiError::Listing(e)
    })?;

    let page = state
        .engine
        .list_players(&params)
        .await
        .map_err(ApiError::Listing)?;

    Ok(Json(page))
}

async fn create_player_handler<S: LeagueStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<NewPlayer>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<Player>>)> {
    let Json(input) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let player = state
        .players
        .create_player(input)
        .await
        .map_err(ApiError::Create)?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(player))))
}

async fn check_duplicate_handler<S: LeagueStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<DuplicateQuery>, QueryRejection>,
) -> ApiResult<Json<ExistsResponse>> {
    let Query(query) = query.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let exists = state
        .players
        .check_duplicate(query.name.as_deref(), query.date_of_birth.as_deref())
        .await
        .map_err(ApiError::CheckDuplicate)?;

    Ok(Json(ExistsResponse::new(exists)))
}

async fn update_player_handler<S: LeagueStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<PlayerUpdate>, JsonRejection>,
) -> ApiResult<Json<DataResponse<PlayerDetails>>> {
    let Path(id) = id.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let Json(update) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let player = state
        .players
        .update_player(id, update)
        .await
        .map_err(ApiError::Update)?;
    let details = state
        .players
        .populate(player)
        .await
        .map_err(ApiError::Update)?;

    Ok(Json(DataResponse::new(details)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn router() -> Router {
        let state = Arc::new(AppState::new(Arc::new(MemoryStore::new())));
        player_routes(state).merge(health_routes())
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_sort_is_bad_request() {
        let response = router()
            .oneshot(
                Request::get("/players?sortBy=shoeSize")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_envelope() {
        let response = router()
            .oneshot(
                Request::post("/players")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["errorType"], "ValidationError");
    }
}
