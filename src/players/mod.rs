//! Player write path
//!
//! Creation validates required fields and rejects a second player with the
//! same name (case-insensitive) and date of birth. Updates replace the
//! fields present in the request and can record a match rating, and the
//! updated player is returned with its references attached.

mod details;
mod errors;
mod input;
mod service;

pub use details::PlayerDetails;
pub use errors::{PlayerError, PlayerResult};
pub use input::{
    CurrentClubInput, NationalTeamInput, NewPlayer, PlayerUpdate, PreviousClubInput,
};
pub use service::PlayerService;
