//! Player document as held in the `players` collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Base rating given to a player when none is supplied
pub const DEFAULT_RATING: f64 = 1.0;

fn default_rating() -> f64 {
    DEFAULT_RATING
}

/// A stored player document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub name: String,

    pub date_of_birth: DateTime<Utc>,

    /// Reference into `positions`
    pub position: Uuid,

    /// Reference into `countries`
    pub country: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_club: Option<CurrentClub>,

    #[serde(default)]
    pub previous_clubs: Vec<PreviousClub>,

    #[serde(default)]
    pub national_teams: Vec<NationalTeamSpell>,

    #[serde(default)]
    pub rating_history: Vec<RatingChange>,

    /// Per-match ratings recorded through the update path
    #[serde(default)]
    pub ratings: Vec<MatchRating>,

    /// Stored base rating. Listings replace it with the rating history sum.
    #[serde(default = "default_rating")]
    pub rating: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Player {
    /// Creates a player with only the required fields set
    pub fn new(
        name: impl Into<String>,
        date_of_birth: DateTime<Utc>,
        position: Uuid,
        country: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date_of_birth,
            position,
            country,
            current_club: None,
            previous_clubs: Vec::new(),
            national_teams: Vec::new(),
            rating_history: Vec::new(),
            ratings: Vec::new(),
            rating: DEFAULT_RATING,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the current club
    pub fn with_club(mut self, club: Uuid) -> Self {
        self.current_club = Some(CurrentClub { club, from: None });
        self
    }

    /// Appends a rating change
    pub fn with_rating_change(mut self, change: RatingChange) -> Self {
        self.rating_history.push(change);
        self
    }

    /// Returns the referenced club id, if any
    pub fn club_id(&self) -> Option<Uuid> {
        self.current_club.as_ref().map(|c| c.club)
    }

    /// National teams the player is still playing for
    pub fn current_national_teams(&self) -> impl Iterator<Item = &NationalTeamSpell> {
        self.national_teams.iter().filter(|t| t.is_current())
    }
}

/// The club a player currently belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentClub {
    /// Reference into `clubteams`
    pub club: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
}

/// A finished club spell. `name` is either a club id or a free label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousClub {
    pub name: String,

    #[serde(default)]
    pub from: Option<DateTime<Utc>>,

    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

/// National team age level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamLevel {
    #[serde(rename = "U-17")]
    U17,
    #[serde(rename = "U-19")]
    U19,
    #[serde(rename = "U-21")]
    U21,
    #[serde(rename = "A")]
    Senior,
}

impl TeamLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamLevel::U17 => "U-17",
            TeamLevel::U19 => "U-19",
            TeamLevel::U21 => "U-21",
            TeamLevel::Senior => "A",
        }
    }
}

/// Membership of a national team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalTeamSpell {
    /// Country label
    pub name: String,

    #[serde(rename = "type")]
    pub level: TeamLevel,

    #[serde(default)]
    pub from: Option<DateTime<Utc>>,

    /// Absent while the player is still called up
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

impl NationalTeamSpell {
    /// True when the spell has no end date
    pub fn is_current(&self) -> bool {
        self.to.is_none()
    }
}

/// One step of the rating history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub date: DateTime<Utc>,
    pub new_rating: f64,
    pub net_rating: f64,
}

/// A rating awarded for a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRating {
    pub date: DateTime<Utc>,
    pub rating: f64,
}
