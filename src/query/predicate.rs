//! Match predicate shared by the page and count pipelines
//!
//! Both pipelines build their match stage from the same [`PlayerFilter`],
//! and both ask it which derived fields and joins it reads. A count can
//! then skip every stage the predicate does not depend on without the
//! two ever disagreeing about which players match.

use regex::{Regex, RegexBuilder};

use super::errors::{QueryError, QueryResult};
use super::params::ListPlayersParams;
use super::row::PlayerRow;

/// Inputs a predicate reads beyond the stored player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requirements {
    pub age: bool,
    pub ratings: bool,
    pub club_join: bool,
    pub country_join: bool,
    pub position_join: bool,
}

/// Conjunction of the listing's match conditions
#[derive(Debug, Clone)]
pub struct PlayerFilter {
    name: Regex,
    max_age: Option<i64>,
    position: Option<String>,
}

impl PlayerFilter {
    /// Builds the predicate from parsed parameters.
    ///
    /// The search text is matched literally, case-insensitively, anywhere
    /// in the name. Age and position only apply when filtering is on.
    pub fn from_params(params: &ListPlayersParams) -> QueryResult<Self> {
        let name = RegexBuilder::new(&regex::escape(&params.search))
            .case_insensitive(true)
            .build()
            .map_err(|e| QueryError::InvalidParam(format!("Invalid search: {}", e)))?;

        Ok(Self {
            name,
            max_age: params.active_age_group().map(|g| g.age_limit()),
            position: params.active_position().map(str::to_string),
        })
    }

    /// What the pipeline must derive or join before this predicate runs
    pub fn requirements(&self) -> Requirements {
        Requirements {
            age: self.max_age.is_some(),
            position_join: self.position.is_some(),
            ..Requirements::default()
        }
    }

    /// True when the row satisfies every condition
    pub fn matches(&self, row: &PlayerRow) -> bool {
        if !self.name.is_match(&row.player.name) {
            return false;
        }

        if let Some(limit) = self.max_age {
            match row.age {
                Some(age) if age < limit => {}
                _ => return false,
            }
        }

        if let Some(label) = &self.position {
            match &row.position_details {
                Some(position) if &position.position == label => {}
                _ => return false,
            }
        }

        true
    }
}
