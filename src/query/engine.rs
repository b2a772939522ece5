//! Player listing engine
//!
//! Runs the page pipeline and the count pipeline for one request
//! concurrently. Either failing fails the whole listing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::observability::{log_event, Event};
use crate::store::LeagueStore;

use super::errors::QueryResult;
use super::params::ListPlayersParams;
use super::pipeline::Pipeline;
use super::predicate::PlayerFilter;
use super::row::PlayerView;

/// One page of a player listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPage {
    pub players: Vec<PlayerView>,
    /// Players matching the filter across all pages
    pub total: u64,
    pub page: usize,
    pub per_page: usize,
}

/// Read-only listing over a [`LeagueStore`]
pub struct ListingEngine<S: LeagueStore> {
    store: Arc<S>,
}

impl<S: LeagueStore> Clone for ListingEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LeagueStore> ListingEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists players with ages derived against the current time
    pub async fn list_players(&self, params: &ListPlayersParams) -> QueryResult<PlayerPage> {
        self.list_players_at(params, Utc::now()).await
    }

    /// Lists players with ages derived against `now`
    pub async fn list_players_at(
        &self,
        params: &ListPlayersParams,
        now: DateTime<Utc>,
    ) -> QueryResult<PlayerPage> {
        let filter = PlayerFilter::from_params(params)?;
        let page_pipeline = Pipeline::page(params, &filter, now);
        let count_pipeline = Pipeline::count(&filter, now);

        let store = self.store.as_ref();
        let result = tokio::try_join!(
            page_pipeline.run(store),
            count_pipeline.count_rows(store)
        );

        let (rows, total) = match result {
            Ok(r) => r,
            Err(e) => {
                log_event(
                    Event::ListingFailed,
                    &[("error", &e.to_string()), ("kind", e.kind())],
                );
                return Err(e);
            }
        };

        let page = PlayerPage {
            players: rows.into_iter().map(PlayerView::from).collect(),
            total,
            page: params.page,
            per_page: params.per_page,
        };

        log_event(
            Event::PlayersListed,
            &[
                ("page", &page.page.to_string()),
                ("per_page", &page.per_page.to_string()),
                ("returned", &page.players.len().to_string()),
                ("sort_by", params.sort_by.as_str()),
                ("total", &page.total.to_string()),
            ],
        );

        Ok(page)
    }
}
