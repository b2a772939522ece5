//! Working rows flowing through a listing pipeline, and the view they
//! are rendered into

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{
    Club, Country, CurrentClub, MatchRating, NationalTeamSpell, Player, Position, PreviousClub,
    RatingChange,
};

/// 365 days in milliseconds; the year length used for derived ages
pub const YEAR_MS: i64 = 365 * 24 * 60 * 60 * 1000;

/// Whole years between `date_of_birth` and `now`, floored.
///
/// Years are a fixed 365 days, so leap days push birthdays slightly early.
pub fn derive_age(date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date_of_birth).num_milliseconds().div_euclid(YEAR_MS)
}

/// Sums of a player's rating history
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingTotals {
    pub rating: f64,
    pub net_rating: f64,
}

impl RatingTotals {
    pub fn from_history(history: &[RatingChange]) -> Self {
        history.iter().fold(Self::default(), |acc, change| Self {
            rating: acc.rating + change.new_rating,
            net_rating: acc.net_rating + change.net_rating,
        })
    }
}

/// A player plus whatever the pipeline has derived or joined so far.
///
/// Derived and joined fields stay `None` until their stage has run; a
/// join that found nothing also leaves its detail `None`.
#[derive(Debug, Clone)]
pub struct PlayerRow {
    pub player: Player,
    pub age: Option<i64>,
    pub totals: Option<RatingTotals>,
    pub club_details: Option<Club>,
    pub country_details: Option<Country>,
    pub position_details: Option<Position>,
}

impl PlayerRow {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            age: None,
            totals: None,
            club_details: None,
            country_details: None,
            position_details: None,
        }
    }
}

/// Denormalized player as returned by a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: DateTime<Utc>,
    pub position: Uuid,
    pub country: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_club: Option<CurrentClub>,
    pub previous_clubs: Vec<PreviousClub>,
    pub national_teams: Vec<NationalTeamSpell>,
    pub rating_history: Vec<RatingChange>,
    pub ratings: Vec<MatchRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Derived age in whole years
    pub age: Option<i64>,
    /// Sum of `newRating` over the rating history
    pub rating: f64,
    /// Sum of `netRating` over the rating history
    pub net_rating: f64,

    pub club_details: Option<Club>,
    pub country_details: Option<Country>,
    pub position_details: Option<Position>,
}

impl From<PlayerRow> for PlayerView {
    fn from(row: PlayerRow) -> Self {
        let player = row.player;
        let totals = row
            .totals
            .unwrap_or_else(|| RatingTotals::from_history(&player.rating_history));

        Self {
            id: player.id,
            name: player.name,
            date_of_birth: player.date_of_birth,
            position: player.position,
            country: player.country,
            current_club: player.current_club,
            previous_clubs: player.previous_clubs,
            national_teams: player.national_teams,
            rating_history: player.rating_history,
            ratings: player.ratings,
            created_at: player.created_at,
            updated_at: player.updated_at,
            age: row.age,
            rating: totals.rating,
            net_rating: totals.net_rating,
            club_details: row.club_details,
            country_details: row.country_details,
            position_details: row.position_details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_age_exactly_twenty_years() {
        let dob = now() - Duration::days(365 * 20);
        assert_eq!(derive_age(dob, now()), 20);
    }

    #[test]
    fn test_age_one_ms_short() {
        let dob = now() - Duration::days(365 * 20) + Duration::milliseconds(1);
        assert_eq!(derive_age(dob, now()), 19);
    }

    #[test]
    fn test_age_future_birth_floors_negative() {
        let dob = now() + Duration::days(1);
        assert_eq!(derive_age(dob, now()), -1);
    }

    #[test]
    fn test_rating_totals() {
        let history = vec![
            RatingChange {
                date: now(),
                new_rating: 2.5,
                net_rating: 0.5,
            },
            RatingChange {
                date: now(),
                new_rating: 3.0,
                net_rating: -1.0,
            },
        ];

        let totals = RatingTotals::from_history(&history);
        assert_eq!(totals.rating, 5.5);
        assert_eq!(totals.net_rating, -0.5);
        assert_eq!(RatingTotals::from_history(&[]), RatingTotals::default());
    }

    #[test]
    fn test_view_overrides_stored_rating() {
        let mut player = Player::new("John", now(), Uuid::new_v4(), Uuid::new_v4());
        player.rating = 7.0;

        let mut row = PlayerRow::new(player);
        row.age = Some(0);
        row.totals = Some(RatingTotals::default());

        let view = PlayerView::from(row);
        assert_eq!(view.rating, 0.0);

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["rating"], json!(0.0));
        assert_eq!(value["netRating"], json!(0.0));
        assert_eq!(value["clubDetails"], json!(null));
        assert_eq!(value["age"], json!(0));
    }
}
