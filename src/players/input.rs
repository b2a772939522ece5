//! Request bodies for player writes
//!
//! Dates arrive as strings (form dates or RFC 3339) and are parsed by the
//! service, so a bad date is reported as a validation error instead of a
//! body rejection.

use serde::Deserialize;
use uuid::Uuid;

use crate::model::{
    parse_optional_date, CurrentClub, NationalTeamSpell, PreviousClub, TeamLevel,
};

use super::errors::{PlayerError, PlayerResult};

/// Body of a create request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub position: Option<Uuid>,
    pub country: Option<Uuid>,
    pub current_club: Option<CurrentClubInput>,
    pub previous_clubs: Option<Vec<PreviousClubInput>>,
    pub national_teams: Option<Vec<NationalTeamInput>>,
    pub rating: Option<f64>,
}

/// Body of an update request; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub position: Option<Uuid>,
    pub country: Option<Uuid>,
    pub current_club: Option<CurrentClubInput>,
    pub previous_clubs: Option<Vec<PreviousClubInput>>,
    pub national_teams: Option<Vec<NationalTeamInput>>,
    /// Match rating to record, together with `match_date`
    pub rating: Option<f64>,
    pub match_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentClubInput {
    pub club: Option<Uuid>,
    pub from: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviousClubInput {
    pub name: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalTeamInput {
    pub name: String,
    #[serde(rename = "type")]
    pub level: TeamLevel,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Overrides `to`: the spell is stored without an end date
    #[serde(default)]
    pub currently_playing: bool,
}

fn date_field(
    field: &'static str,
    value: Option<&str>,
) -> PlayerResult<Option<chrono::DateTime<chrono::Utc>>> {
    parse_optional_date(value).map_err(|e| PlayerError::InvalidDate { field, value: e.0 })
}

impl CurrentClubInput {
    /// `None` when no club was picked
    pub fn into_model(self) -> PlayerResult<Option<CurrentClub>> {
        let Some(club) = self.club else {
            return Ok(None);
        };
        Ok(Some(CurrentClub {
            club,
            from: date_field("currentClub.from", self.from.as_deref())?,
        }))
    }
}

impl PreviousClubInput {
    pub fn into_model(self) -> PlayerResult<PreviousClub> {
        Ok(PreviousClub {
            from: date_field("previousClubs.from", self.from.as_deref())?,
            to: date_field("previousClubs.to", self.to.as_deref())?,
            name: self.name,
        })
    }
}

impl NationalTeamInput {
    pub fn into_model(self) -> PlayerResult<NationalTeamSpell> {
        let to = if self.currently_playing {
            None
        } else {
            date_field("nationalTeams.to", self.to.as_deref())?
        };

        Ok(NationalTeamSpell {
            from: date_field("nationalTeams.from", self.from.as_deref())?,
            to,
            name: self.name,
            level: self.level,
        })
    }
}

/// Converts every element, failing on the first bad one
pub(crate) fn convert_all<I, T>(
    items: Vec<I>,
    convert: impl Fn(I) -> PlayerResult<T>,
) -> PlayerResult<Vec<T>> {
    items.into_iter().map(convert).collect()
}
