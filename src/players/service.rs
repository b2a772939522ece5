//! Player creation, duplicate detection and update

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::model::{parse_date, MatchRating, Player, DEFAULT_RATING};
use crate::observability::{log_event, Event};
use crate::store::LeagueStore;

use super::details::PlayerDetails;
use super::errors::{PlayerError, PlayerResult};
use super::input::{convert_all, NewPlayer, PlayerUpdate};

/// Write path for the `players` collection
pub struct PlayerService<S: LeagueStore> {
    store: Arc<S>,
}

impl<S: LeagueStore> Clone for PlayerService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

/// Trimmed, non-empty string
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

impl<S: LeagueStore> PlayerService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validates and stores a new player.
    ///
    /// Name, date of birth, position and country are required. The name is
    /// trimmed before the duplicate check and before storage.
    pub async fn create_player(&self, input: NewPlayer) -> PlayerResult<Player> {
        let result = self.try_create(input).await;

        match &result {
            Ok(player) => log_event(
                Event::PlayerCreated,
                &[("id", &player.id.to_string()), ("name", &player.name)],
            ),
            Err(e) if e.is_client_error() => {
                log_event(Event::PlayerRejected, &[("reason", &e.to_string())])
            }
            Err(e) => log_event(Event::PlayerWriteFailed, &[("error", &e.to_string())]),
        }

        result
    }

    async fn try_create(&self, input: NewPlayer) -> PlayerResult<Player> {
        let (Some(name), Some(dob), Some(position), Some(country)) = (
            non_blank(input.name.as_deref()),
            non_blank(input.date_of_birth.as_deref()),
            input.position,
            input.country,
        ) else {
            return Err(PlayerError::MissingRequiredFields);
        };

        let date_of_birth = parse_date(dob).ok_or(PlayerError::InvalidDateOfBirth)?;

        if self
            .store
            .find_player_by_identity(name, date_of_birth)
            .await?
            .is_some()
        {
            return Err(PlayerError::Duplicate);
        }

        let mut player = Player::new(name, date_of_birth, position, country);
        player.current_club = match input.current_club {
            Some(club) => club.into_model()?,
            None => None,
        };
        player.previous_clubs =
            convert_all(input.previous_clubs.unwrap_or_default(), |c| c.into_model())?;
        player.national_teams =
            convert_all(input.national_teams.unwrap_or_default(), |t| t.into_model())?;
        player.rating = input.rating.unwrap_or(DEFAULT_RATING);

        let now = Utc::now();
        player.created_at = Some(now);
        player.updated_at = Some(now);

        self.store.insert_player(player.clone()).await?;
        Ok(player)
    }

    /// True when a player with this name (case-insensitive) and date of
    /// birth already exists
    pub async fn check_duplicate(
        &self,
        name: Option<&str>,
        date_of_birth: Option<&str>,
    ) -> PlayerResult<bool> {
        let (Some(name), Some(dob)) = (non_blank(name), non_blank(date_of_birth)) else {
            return Err(PlayerError::MissingIdentity);
        };

        let date_of_birth = parse_date(dob).ok_or(PlayerError::InvalidDate {
            field: "dateOfBirth",
            value: dob.to_string(),
        })?;

        Ok(self
            .store
            .find_player_by_identity(name, date_of_birth)
            .await?
            .is_some())
    }

    /// Applies the present fields of `update` to an existing player.
    ///
    /// A `rating` together with a `match_date` is appended to the player's
    /// match ratings.
    pub async fn update_player(&self, id: Uuid, update: PlayerUpdate) -> PlayerResult<Player> {
        let result = self.try_update(id, update).await;

        match &result {
            Ok(player) => log_event(
                Event::PlayerUpdated,
                &[("id", &player.id.to_string()), ("name", &player.name)],
            ),
            Err(e) if e.is_client_error() => {
                log_event(Event::PlayerRejected, &[("id", &id.to_string()), ("reason", &e.to_string())])
            }
            Err(e) => log_event(
                Event::PlayerWriteFailed,
                &[("id", &id.to_string()), ("error", &e.to_string())],
            ),
        }

        result
    }

    async fn try_update(&self, id: Uuid, update: PlayerUpdate) -> PlayerResult<Player> {
        let mut player = self
            .store
            .find_player(id)
            .await?
            .ok_or(PlayerError::NotFound(id))?;

        let identity_before = (player.name.to_lowercase(), player.date_of_birth);
        if let Some(name) = non_blank(update.name.as_deref()) {
            player.name = name.to_string();
        }
        if let Some(dob) = non_blank(update.date_of_birth.as_deref()) {
            player.date_of_birth = parse_date(dob).ok_or(PlayerError::InvalidDateOfBirth)?;
        }
        if (player.name.to_lowercase(), player.date_of_birth) != identity_before {
            let holder = self
                .store
                .find_player_by_identity(&player.name, player.date_of_birth)
                .await?;
            if holder.is_some_and(|other| other.id != player.id) {
                return Err(PlayerError::Duplicate);
            }
        }
        if let Some(position) = update.position {
            player.position = position;
        }
        if let Some(country) = update.country {
            player.country = country;
        }
        if let Some(club) = update.current_club {
            player.current_club = club.into_model()?;
        }
        if let Some(clubs) = update.previous_clubs {
            player.previous_clubs = convert_all(clubs, |c| c.into_model())?;
        }
        if let Some(teams) = update.national_teams {
            player.national_teams = convert_all(teams, |t| t.into_model())?;
        }

        if let (Some(rating), Some(match_date)) =
            (update.rating, non_blank(update.match_date.as_deref()))
        {
            let date = parse_date(match_date).ok_or(PlayerError::InvalidDate {
                field: "matchDate",
                value: match_date.to_string(),
            })?;
            player.ratings.push(MatchRating { date, rating });
        }

        player.updated_at = Some(Utc::now());

        self.store.replace_player(player.clone()).await?;
        Ok(player)
    }

    /// Attaches the player's club, country and position documents.
    ///
    /// A dangling reference leaves its detail empty.
    pub async fn populate(&self, player: Player) -> PlayerResult<PlayerDetails> {
        let club_details = match player.club_id() {
            Some(id) => self.store.clubs_by_id(&[id]).await?.remove(&id),
            None => None,
        };
        let country_details = self
            .store
            .countries_by_id(&[player.country])
            .await?
            .remove(&player.country);
        let position_details = self
            .store
            .positions_by_id(&[player.position])
            .await?
            .remove(&player.position);

        Ok(PlayerDetails {
            player,
            club_details,
            country_details,
            position_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::input::{CurrentClubInput, NationalTeamInput};
    use crate::model::{Club, Country, Position, TeamLevel};
    use crate::store::MemoryStore;

    fn service() -> PlayerService<MemoryStore> {
        PlayerService::new(Arc::new(MemoryStore::new()))
    }

    fn new_player(name: &str, dob: &str) -> NewPlayer {
        NewPlayer {
            name: Some(name.to_string()),
            date_of_birth: Some(dob.to_string()),
            position: Some(Uuid::new_v4()),
            country: Some(Uuid::new_v4()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_defaults() {
        let svc = service();
        let player = svc
            .create_player(new_player("  John Smith ", "2001-02-03"))
            .await
            .unwrap();

        assert_eq!(player.name, "John Smith");
        assert_eq!(player.rating, DEFAULT_RATING);
        assert!(player.rating_history.is_empty());
        assert!(player.ratings.is_empty());
        assert!(player.created_at.is_some());
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let svc = service();
        let mut input = new_player("John", "2001-02-03");
        input.country = None;

        let result = svc.create_player(input).await;
        assert!(matches!(result, Err(PlayerError::MissingRequiredFields)));

        let result = svc.create_player(new_player("   ", "2001-02-03")).await;
        assert!(matches!(result, Err(PlayerError::MissingRequiredFields)));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_birth_date() {
        let result = service()
            .create_player(new_player("John", "03/02/2001"))
            .await;
        assert!(matches!(result, Err(PlayerError::InvalidDateOfBirth)));
    }

    #[tokio::test]
    async fn test_duplicate_is_case_insensitive() {
        let svc = service();
        svc.create_player(new_player("John Smith", "2001-02-03"))
            .await
            .unwrap();

        let result = svc
            .create_player(new_player("john SMITH", "2001-02-03"))
            .await;
        assert!(matches!(result, Err(PlayerError::Duplicate)));

        // Same name, different birthday is a different player
        svc.create_player(new_player("John Smith", "2001-02-04"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_check_duplicate() {
        let svc = service();
        svc.create_player(new_player("Joan", "1999-09-09"))
            .await
            .unwrap();

        assert!(svc
            .check_duplicate(Some("JOAN"), Some("1999-09-09"))
            .await
            .unwrap());
        assert!(!svc
            .check_duplicate(Some("Joan"), Some("1999-09-10"))
            .await
            .unwrap());
        assert!(matches!(
            svc.check_duplicate(None, Some("1999-09-09")).await,
            Err(PlayerError::MissingIdentity)
        ));
        assert!(matches!(
            svc.check_duplicate(Some("Joan"), Some("soon")).await,
            Err(PlayerError::InvalidDate { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_fields_and_rating() {
        let svc = service();
        let created = svc
            .create_player(new_player("Mike", "1995-05-05"))
            .await
            .unwrap();
        let club = Uuid::new_v4();

        let update = PlayerUpdate {
            name: Some("Michael".to_string()),
            current_club: Some(CurrentClubInput {
                club: Some(club),
                from: Some("2023-07-01".to_string()),
            }),
            national_teams: Some(vec![NationalTeamInput {
                name: "England".to_string(),
                level: TeamLevel::Senior,
                from: Some("2020-01-01".to_string()),
                to: Some("2021-01-01".to_string()),
                currently_playing: true,
            }]),
            rating: Some(7.5),
            match_date: Some("2024-03-10".to_string()),
            ..Default::default()
        };

        let updated = svc.update_player(created.id, update).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Michael");
        assert_eq!(updated.date_of_birth, created.date_of_birth);
        assert_eq!(updated.club_id(), Some(club));
        assert!(updated.national_teams[0].is_current());
        assert_eq!(updated.ratings.len(), 1);
        assert_eq!(updated.ratings[0].rating, 7.5);
    }

    #[tokio::test]
    async fn test_rating_without_match_date_is_ignored() {
        let svc = service();
        let created = svc
            .create_player(new_player("Mike", "1995-05-05"))
            .await
            .unwrap();

        let update = PlayerUpdate {
            rating: Some(6.0),
            ..Default::default()
        };
        let updated = svc.update_player(created.id, update).await.unwrap();
        assert!(updated.ratings.is_empty());
    }

    #[tokio::test]
    async fn test_update_cannot_take_another_identity() {
        let svc = service();
        svc.create_player(new_player("John Smith", "2001-02-03"))
            .await
            .unwrap();
        let mike = svc
            .create_player(new_player("Mike", "2001-02-03"))
            .await
            .unwrap();

        let rename = PlayerUpdate {
            name: Some("JOHN SMITH".to_string()),
            ..Default::default()
        };
        let result = svc.update_player(mike.id, rename).await;
        assert!(matches!(result, Err(PlayerError::Duplicate)));

        let store_copy = svc.store.find_player(mike.id).await.unwrap().unwrap();
        assert_eq!(store_copy.name, "Mike");
        assert!(svc
            .check_duplicate(Some("Mike"), Some("2001-02-03"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_may_change_case_of_own_name() {
        let svc = service();
        let created = svc
            .create_player(new_player("john smith", "2001-02-03"))
            .await
            .unwrap();

        let update = PlayerUpdate {
            name: Some("John Smith".to_string()),
            ..Default::default()
        };
        let updated = svc.update_player(created.id, update).await.unwrap();
        assert_eq!(updated.name, "John Smith");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_store_one_identity() {
        for _ in 0..50 {
            let svc = service();
            let barrier = Arc::new(tokio::sync::Barrier::new(8));

            let tasks: Vec<_> = (0..8)
                .map(|_| {
                    let svc = svc.clone();
                    let barrier = Arc::clone(&barrier);
                    tokio::spawn(async move {
                        barrier.wait().await;
                        svc.create_player(new_player("Race", "2000-01-01")).await
                    })
                })
                .collect();

            let mut created = 0;
            for task in tasks {
                match task.await.unwrap() {
                    Ok(_) => created += 1,
                    Err(e) => assert!(matches!(e, PlayerError::Duplicate)),
                }
            }

            assert_eq!(created, 1);
            assert_eq!(svc.store.players().await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_populate_attaches_references() {
        let store = Arc::new(MemoryStore::new());
        let club = Club::new("Alpha FC");
        let country = Country::new("Spain");
        let position = Position::new("Forward");
        store.add_club(club.clone()).unwrap();
        store.add_country(country.clone()).unwrap();
        store.add_position(position.clone()).unwrap();
        let svc = PlayerService::new(store);

        let player = Player::new("Joan", Utc::now(), position.id, country.id).with_club(club.id);
        let details = svc.populate(player).await.unwrap();
        assert_eq!(details.club_details, Some(club));
        assert_eq!(details.country_details, Some(country.clone()));
        assert_eq!(details.position_details, Some(position));

        let clubless = Player::new("Mike", Utc::now(), Uuid::new_v4(), country.id);
        let details = svc.populate(clubless).await.unwrap();
        assert!(details.club_details.is_none());
        assert!(details.position_details.is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_player() {
        let result = service()
            .update_player(Uuid::new_v4(), PlayerUpdate::default())
            .await;
        assert!(matches!(result, Err(PlayerError::NotFound(_))));
    }
}
