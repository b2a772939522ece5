//! Document store for the league collections
//!
//! The listing engine only needs two kinds of reads: a full scan of
//! `players` in store order, and batched id lookups into the referenced
//! collections. The write path adds identity lookups, inserts and
//! whole-document replaces.
//!
//! [`MemoryStore`] is the bundled implementation. Futures returned by the
//! trait are `Send` so engines generic over the store can be driven from
//! axum handlers.

mod errors;
mod memory;

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{Club, Country, Player, Position};

pub use errors::{StoreError, StoreResult};
pub use memory::{Collections, MemoryStore};

/// Read/write access to `players`, `clubteams`, `countries`, `positions`
pub trait LeagueStore: Send + Sync {
    /// All players in store order
    fn players(&self) -> impl Future<Output = StoreResult<Vec<Player>>> + Send;

    /// Clubs whose id is in `ids`; missing ids are simply absent
    fn clubs_by_id(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = StoreResult<HashMap<Uuid, Club>>> + Send;

    /// Countries whose id is in `ids`
    fn countries_by_id(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = StoreResult<HashMap<Uuid, Country>>> + Send;

    /// Positions whose id is in `ids`
    fn positions_by_id(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = StoreResult<HashMap<Uuid, Position>>> + Send;

    /// Player by id
    fn find_player(&self, id: Uuid) -> impl Future<Output = StoreResult<Option<Player>>> + Send;

    /// Player with the same name (case-insensitive) and date of birth
    fn find_player_by_identity(
        &self,
        name: &str,
        date_of_birth: DateTime<Utc>,
    ) -> impl Future<Output = StoreResult<Option<Player>>> + Send;

    /// Appends a new player.
    ///
    /// Fails with `DuplicateIdentity` when another player has the same name
    /// (case-insensitive) and date of birth. The check and the write are one
    /// atomic step.
    fn insert_player(&self, player: Player) -> impl Future<Output = StoreResult<()>> + Send;

    /// Replaces the stored player with the same id, under the same
    /// identity rule as `insert_player`
    fn replace_player(&self, player: Player) -> impl Future<Output = StoreResult<()>> + Send;
}
