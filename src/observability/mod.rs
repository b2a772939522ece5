//! Observability for the roster server
//!
//! Structured JSON logging and the catalogue of events it reports.
//!
//! # Usage
//!
//! ```ignore
//! use league_roster::observability::{log_event, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Warn);
//! log_event(Event::PlayerCreated, &[("id", "...")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Logs `event` at its default severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
