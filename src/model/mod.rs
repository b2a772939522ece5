//! Document types for the four league collections
//!
//! - `players` holds [`Player`]
//! - `clubteams`, `countries`, `positions` hold the referenced
//!   [`Club`], [`Country`] and [`Position`] documents

mod dates;
mod player;
mod reference;

pub use dates::{parse_date, parse_optional_date, InvalidDate};
pub use player::{
    CurrentClub, MatchRating, NationalTeamSpell, Player, PreviousClub, RatingChange, TeamLevel,
    DEFAULT_RATING,
};
pub use reference::{Club, Country, Position, Reference};
