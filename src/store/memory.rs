//! In-memory document store
//!
//! Collections live behind a single `RwLock`. Players keep insertion
//! order, which is the "store order" listings fall back to for ties.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Club, Country, Player, Position, Reference};

use super::errors::{StoreError, StoreResult};
use super::LeagueStore;

/// The four collections, in the layout of the seed file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub players: Vec<Player>,

    #[serde(default)]
    pub clubteams: Vec<Club>,

    #[serde(default)]
    pub countries: Vec<Country>,

    #[serde(default)]
    pub positions: Vec<Position>,
}

/// Lock-protected in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given collections
    pub fn with_collections(collections: Collections) -> Self {
        Self {
            collections: RwLock::new(collections),
        }
    }

    /// Loads collections from a JSON seed file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let collections: Collections = serde_json::from_str(&content)?;
        Ok(Self::with_collections(collections))
    }

    /// Copy of the current collections
    pub fn snapshot(&self) -> StoreResult<Collections> {
        let guard = self
            .collections
            .read()
            .map_err(|_| StoreError::poisoned("collections"))?;
        Ok(guard.clone())
    }

    /// Adds a club
    pub fn add_club(&self, club: Club) -> StoreResult<()> {
        self.write()?.clubteams.push(club);
        Ok(())
    }

    /// Adds a country
    pub fn add_country(&self, country: Country) -> StoreResult<()> {
        self.write()?.countries.push(country);
        Ok(())
    }

    /// Adds a position
    pub fn add_position(&self, position: Position) -> StoreResult<()> {
        self.write()?.positions.push(position);
        Ok(())
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| StoreError::poisoned("collections"))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| StoreError::poisoned("collections"))
    }
}

/// Picks the documents whose id is in `ids`
fn index_by_id<T: Reference>(docs: &[T], ids: &[Uuid]) -> HashMap<Uuid, T> {
    docs.iter()
        .filter(|d| ids.contains(&d.id()))
        .map(|d| (d.id(), d.clone()))
        .collect()
}

/// First player with this name (case-insensitive) and date of birth
fn find_by_identity<'a>(
    players: &'a [Player],
    name: &str,
    date_of_birth: DateTime<Utc>,
) -> Option<&'a Player> {
    let needle = name.to_lowercase();
    players
        .iter()
        .find(|p| p.date_of_birth == date_of_birth && p.name.to_lowercase() == needle)
}

/// Fails when a player other than `player` holds its identity
fn ensure_identity_free(players: &[Player], player: &Player) -> StoreResult<()> {
    match find_by_identity(players, &player.name, player.date_of_birth) {
        Some(existing) if existing.id != player.id => Err(StoreError::DuplicateIdentity {
            name: player.name.clone(),
            date_of_birth: player.date_of_birth,
        }),
        _ => Ok(()),
    }
}

impl LeagueStore for MemoryStore {
    async fn players(&self) -> StoreResult<Vec<Player>> {
        Ok(self.read()?.players.clone())
    }

    async fn clubs_by_id(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, Club>> {
        Ok(index_by_id(&self.read()?.clubteams, ids))
    }

    async fn countries_by_id(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, Country>> {
        Ok(index_by_id(&self.read()?.countries, ids))
    }

    async fn positions_by_id(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, Position>> {
        Ok(index_by_id(&self.read()?.positions, ids))
    }

    async fn find_player(&self, id: Uuid) -> StoreResult<Option<Player>> {
        Ok(self.read()?.players.iter().find(|p| p.id == id).cloned())
    }

    async fn find_player_by_identity(
        &self,
        name: &str,
        date_of_birth: DateTime<Utc>,
    ) -> StoreResult<Option<Player>> {
        Ok(find_by_identity(&self.read()?.players, name, date_of_birth).cloned())
    }

    async fn insert_player(&self, player: Player) -> StoreResult<()> {
        let mut collections = self.write()?;
        if collections.players.iter().any(|p| p.id == player.id) {
            return Err(StoreError::DuplicateId(player.id));
        }
        ensure_identity_free(&collections.players, &player)?;
        collections.players.push(player);
        Ok(())
    }

    async fn replace_player(&self, player: Player) -> StoreResult<()> {
        let mut collections = self.write()?;
        ensure_identity_free(&collections.players, &player)?;
        let slot = collections
            .players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or(StoreError::NotFound(player.id))?;
        *slot = player;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn dob() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_insert_keeps_store_order() {
        let store = MemoryStore::new();
        for name in ["Charlie", "Alice", "Bob"] {
            let player = Player::new(name, dob(), Uuid::new_v4(), Uuid::new_v4());
            store.insert_player(player).await.unwrap();
        }

        let names: Vec<_> = store
            .players()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = MemoryStore::new();
        let player = Player::new("Alice", dob(), Uuid::new_v4(), Uuid::new_v4());
        store.insert_player(player.clone()).await.unwrap();

        let result = store.insert_player(player).await;
        assert!(matches!(result, Err(StoreError::DuplicateId(_))));
    }

    #[tokio::test]
    async fn test_lookup_by_ids() {
        let store = MemoryStore::new();
        let alpha = Club::new("Alpha FC");
        let beta = Club::new("Beta FC");
        store.add_club(alpha.clone()).unwrap();
        store.add_club(beta).unwrap();

        let found = store
            .clubs_by_id(&[alpha.id, Uuid::new_v4()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[&alpha.id].name, "Alpha FC");
    }

    #[tokio::test]
    async fn test_identity_lookup_ignores_case() {
        let store = MemoryStore::new();
        let player = Player::new("John Smith", dob(), Uuid::new_v4(), Uuid::new_v4());
        store.insert_player(player.clone()).await.unwrap();

        let found = store
            .find_player_by_identity("JOHN smith", dob())
            .await
            .unwrap();
        assert_eq!(found.map(|p| p.id), Some(player.id));

        let other_day = Utc.with_ymd_and_hms(1999, 1, 2, 0, 0, 0).unwrap();
        assert!(store
            .find_player_by_identity("John Smith", other_day)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_taken_identity() {
        let store = MemoryStore::new();
        let first = Player::new("John Smith", dob(), Uuid::new_v4(), Uuid::new_v4());
        store.insert_player(first).await.unwrap();

        let second = Player::new("JOHN SMITH", dob(), Uuid::new_v4(), Uuid::new_v4());
        let result = store.insert_player(second).await;
        assert!(matches!(result, Err(StoreError::DuplicateIdentity { .. })));
        assert_eq!(store.players().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_rejects_taken_identity() {
        let store = MemoryStore::new();
        let john = Player::new("John Smith", dob(), Uuid::new_v4(), Uuid::new_v4());
        let mut mike = Player::new("Mike", dob(), Uuid::new_v4(), Uuid::new_v4());
        store.insert_player(john).await.unwrap();
        store.insert_player(mike.clone()).await.unwrap();

        // Keeping its own identity is fine
        mike.rating = 3.0;
        store.replace_player(mike.clone()).await.unwrap();

        mike.name = "john smith".to_string();
        let result = store.replace_player(mike.clone()).await;
        assert!(matches!(result, Err(StoreError::DuplicateIdentity { .. })));
        assert_eq!(store.find_player(mike.id).await.unwrap().unwrap().name, "Mike");
    }

    #[tokio::test]
    async fn test_replace_missing_player() {
        let store = MemoryStore::new();
        let player = Player::new("Ghost", dob(), Uuid::new_v4(), Uuid::new_v4());

        let result = store.replace_player(player).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_seed_file() {
        let position = Position::new("Forward");
        let country = Country::new("Spain");
        let seed = serde_json::json!({
            "players": [{
                "_id": Uuid::new_v4(),
                "name": "Joan",
                "dateOfBirth": "2001-04-02T00:00:00Z",
                "position": position.id,
                "country": country.id,
            }],
            "countries": [country],
            "positions": [position],
        });

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", seed).unwrap();

        let store = MemoryStore::load(file.path()).unwrap();
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.players.len(), 1);
        assert_eq!(snapshot.countries.len(), 1);
        assert!(snapshot.clubteams.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = MemoryStore::load(Path::new("/nonexistent/league.json"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
