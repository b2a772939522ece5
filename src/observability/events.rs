//! Observable events
//!
//! Every log line names one of these.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Collections seeded into the store
    StoreSeeded,
    /// HTTP listener bound
    ServerStarted,
    /// HTTP server stopped with an error
    ServerFailed,
    /// A request ran past the configured timeout
    RequestTimedOut,

    // Listing
    /// A listing page was produced
    PlayersListed,
    /// Listing parameters were rejected
    ListingRejected,
    /// A listing pipeline failed in the store
    ListingFailed,

    // Writes
    /// Player created
    PlayerCreated,
    /// Player creation rejected (validation or duplicate)
    PlayerRejected,
    /// Player updated
    PlayerUpdated,
    /// A write failed in the store
    PlayerWriteFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreSeeded => "STORE_SEEDED",
            Event::ServerStarted => "SERVER_STARTED",
            Event::ServerFailed => "SERVER_FAILED",
            Event::RequestTimedOut => "REQUEST_TIMED_OUT",

            Event::PlayersListed => "PLAYERS_LISTED",
            Event::ListingRejected => "LISTING_REJECTED",
            Event::ListingFailed => "LISTING_FAILED",

            Event::PlayerCreated => "PLAYER_CREATED",
            Event::PlayerRejected => "PLAYER_REJECTED",
            Event::PlayerUpdated => "PLAYER_UPDATED",
            Event::PlayerWriteFailed => "PLAYER_WRITE_FAILED",
        }
    }

    /// Severity the event is normally logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::PlayersListed => Severity::Trace,
            Event::ListingRejected | Event::PlayerRejected | Event::RequestTimedOut => {
                Severity::Warn
            }
            Event::ServerFailed | Event::ListingFailed | Event::PlayerWriteFailed => {
                Severity::Error
            }
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        let events = [
            Event::ConfigLoaded,
            Event::StoreSeeded,
            Event::ServerStarted,
            Event::ServerFailed,
            Event::RequestTimedOut,
            Event::PlayersListed,
            Event::ListingRejected,
            Event::ListingFailed,
            Event::PlayerCreated,
            Event::PlayerRejected,
            Event::PlayerUpdated,
            Event::PlayerWriteFailed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_failures_are_errors() {
        assert_eq!(Event::ListingFailed.severity(), Severity::Error);
        assert_eq!(Event::PlayerRejected.severity(), Severity::Warn);
        assert_eq!(Event::ServerStarted.severity(), Severity::Info);
    }
}
