//! # Listing Parameter Parser
//!
//! Turns the raw string query parameters of a player listing into a typed
//! [`ListPlayersParams`].
//!
//! Coercion rules:
//! - `page`/`perPage` must be positive integers; anything else falls back
//!   to the default instead of failing the request
//! - `perPage` above [`MAX_PER_PAGE`] is rejected
//! - `sortOrder` is ascending only for the exact value `asc`
//! - `filter` is on only for the exact value `true`
//! - unknown `ageGroup` values are ignored, unknown `sortBy` values are rejected
//! - `position` is percent-decoded once more after transport decoding

use std::collections::HashMap;
use std::fmt;

use percent_encoding::percent_decode_str;

use super::errors::{QueryError, QueryResult};
use super::sorter::SortKey;

/// Page used when `page` is missing or unusable
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when `perPage` is missing or unusable
pub const DEFAULT_PER_PAGE: usize = 10;

/// Largest page size a caller may ask for
pub const MAX_PER_PAGE: usize = 1000;

/// Named age bucket, a strict upper bound on derived age
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGroup {
    Under20,
    Under22,
    Under26,
    Under30,
}

impl AgeGroup {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "under20" => Some(AgeGroup::Under20),
            "under22" => Some(AgeGroup::Under22),
            "under26" => Some(AgeGroup::Under26),
            "under30" => Some(AgeGroup::Under30),
            _ => None,
        }
    }

    /// Exclusive upper bound on age
    pub fn age_limit(&self) -> i64 {
        match self {
            AgeGroup::Under20 => 20,
            AgeGroup::Under22 => 22,
            AgeGroup::Under26 => 26,
            AgeGroup::Under30 => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Under20 => "under20",
            AgeGroup::Under22 => "under22",
            AgeGroup::Under26 => "under26",
            AgeGroup::Under30 => "under30",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only `asc` is ascending; every other value sorts descending
    pub fn parse(value: &str) -> Self {
        if value == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Logical sort field as named by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    DateOfBirth,
    Age,
    Rating,
    NetRating,
    Club,
    Country,
    Position,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(SortField::Name),
            "dateOfBirth" => Some(SortField::DateOfBirth),
            "age" => Some(SortField::Age),
            "rating" => Some(SortField::Rating),
            "netRating" => Some(SortField::NetRating),
            "club" => Some(SortField::Club),
            "country" => Some(SortField::Country),
            "position" => Some(SortField::Position),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::DateOfBirth => "dateOfBirth",
            SortField::Age => "age",
            SortField::Rating => "rating",
            SortField::NetRating => "netRating",
            SortField::Club => "club",
            SortField::Country => "country",
            SortField::Position => "position",
        }
    }

    /// Maps the logical field to the physical value it sorts on.
    ///
    /// `club`, `country` and `position` sort on the label of the joined
    /// document rather than on the stored reference id.
    pub fn resolve(&self) -> SortKey {
        match self {
            SortField::Name => SortKey::Name,
            SortField::DateOfBirth => SortKey::DateOfBirth,
            SortField::Age => SortKey::Age,
            SortField::Rating => SortKey::Rating,
            SortField::NetRating => SortKey::NetRating,
            SortField::Club => SortKey::ClubName,
            SortField::Country => SortKey::CountryName,
            SortField::Position => SortKey::PositionLabel,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsed player listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPlayersParams {
    /// 1-based page number
    pub page: usize,

    pub per_page: usize,

    /// Case-insensitive substring of the player name
    pub search: String,

    pub sort_by: SortField,

    pub sort_order: SortOrder,

    /// Enables `age_group` and `position`
    pub filter: bool,

    pub age_group: Option<AgeGroup>,

    /// Decoded position label
    pub position: Option<String>,
}

impl Default for ListPlayersParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            search: String::new(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            filter: false,
            age_group: None,
            position: None,
        }
    }
}

impl ListPlayersParams {
    /// Parse listing parameters from raw query pairs
    pub fn parse(params: &HashMap<String, String>) -> QueryResult<Self> {
        let mut result = ListPlayersParams::default();

        for (key, value) in params {
            match key.as_str() {
                "page" => {
                    result.page = parse_positive(value).unwrap_or(DEFAULT_PAGE);
                }
                "perPage" => {
                    result.per_page = parse_positive(value).unwrap_or(DEFAULT_PER_PAGE);
                }
                "search" => {
                    result.search = value.clone();
                }
                "sortBy" => {
                    if !value.is_empty() {
                        result.sort_by = SortField::parse(value).ok_or_else(|| {
                            QueryError::InvalidParam(format!("unknown sortBy: {}", value))
                        })?;
                    }
                }
                "sortOrder" => {
                    result.sort_order = SortOrder::parse(value);
                }
                "filter" => {
                    result.filter = value == "true";
                }
                "ageGroup" => {
                    result.age_group = AgeGroup::parse(value);
                }
                "position" => {
                    result.position = parse_position(value)?;
                }
                _ => {}
            }
        }

        if result.per_page > MAX_PER_PAGE {
            return Err(QueryError::LimitExceeded(result.per_page, MAX_PER_PAGE));
        }

        Ok(result)
    }

    /// Number of matching records to skip before the page starts
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Age bound in effect, only when filtering is enabled
    pub fn active_age_group(&self) -> Option<AgeGroup> {
        self.age_group.filter(|_| self.filter)
    }

    /// Position label in effect, only when filtering is enabled
    pub fn active_position(&self) -> Option<&str> {
        self.position.as_deref().filter(|_| self.filter)
    }
}

/// Positive integer or `None`
fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// Percent-decode a position label; empty means no position filter
fn parse_position(value: &str) -> QueryResult<Option<String>> {
    if value.is_empty() {
        return Ok(None);
    }

    let decoded = percent_decode_str(value)
        .decode_utf8()
        .map_err(|_| QueryError::InvalidParam(format!("Invalid position: {}", value)))?;

    Ok(Some(decoded.into_owned()))
}
