//! Player document with its references resolved

use serde::Serialize;

use crate::model::{Club, Country, Player, Position};

/// A stored player plus the club, country and position it points at.
///
/// The player's own fields are flattened into the same object, so clients
/// reading `name` or `ratings` see the same shape as a bare player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetails {
    #[serde(flatten)]
    pub player: Player,
    pub club_details: Option<Club>,
    pub country_details: Option<Country>,
    pub position_details: Option<Position>,
}
