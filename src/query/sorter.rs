//! Row sorting for listing pipelines
//!
//! Ordering across value kinds: missing < number < string < date.
//! Missing values therefore come first ascending and last descending.
//! The sort is stable, so rows with equal keys keep store order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::params::SortOrder;
use super::row::PlayerRow;

/// Physical value a listing sorts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    DateOfBirth,
    Age,
    Rating,
    NetRating,
    ClubName,
    CountryName,
    PositionLabel,
}

impl SortKey {
    /// Document path of the value, as it appears in a rendered row
    pub fn path(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::DateOfBirth => "dateOfBirth",
            SortKey::Age => "age",
            SortKey::Rating => "rating",
            SortKey::NetRating => "netRating",
            SortKey::ClubName => "clubDetails.name",
            SortKey::CountryName => "countryDetails.name",
            SortKey::PositionLabel => "positionDetails.position",
        }
    }

    /// Reads the key's value from a row
    pub fn extract<'a>(&self, row: &'a PlayerRow) -> SortValue<'a> {
        match self {
            SortKey::Name => SortValue::Text(&row.player.name),
            SortKey::DateOfBirth => SortValue::Date(row.player.date_of_birth),
            SortKey::Age => row
                .age
                .map(|a| SortValue::Number(a as f64))
                .unwrap_or(SortValue::Missing),
            SortKey::Rating => row
                .totals
                .map(|t| SortValue::Number(t.rating))
                .unwrap_or(SortValue::Missing),
            SortKey::NetRating => row
                .totals
                .map(|t| SortValue::Number(t.net_rating))
                .unwrap_or(SortValue::Missing),
            SortKey::ClubName => row
                .club_details
                .as_ref()
                .map(|c| SortValue::Text(&c.name))
                .unwrap_or(SortValue::Missing),
            SortKey::CountryName => row
                .country_details
                .as_ref()
                .map(|c| SortValue::Text(&c.name))
                .unwrap_or(SortValue::Missing),
            SortKey::PositionLabel => row
                .position_details
                .as_ref()
                .map(|p| SortValue::Text(&p.position))
                .unwrap_or(SortValue::Missing),
        }
    }
}

/// A sort key paired with its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

/// A comparable value extracted from a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
    Date(DateTime<Utc>),
}

impl SortValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortValue::Missing => 0,
            SortValue::Number(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Date(_) => 3,
        }
    }

    /// Total order over values of any kind
    pub fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Sorts pipeline rows
pub struct RowSorter;

impl RowSorter {
    /// Sorts rows in place according to `spec`
    pub fn sort(rows: &mut [PlayerRow], spec: &SortSpec) {
        rows.sort_by(|a, b| {
            let ordering = spec.key.extract(a).compare(&spec.key.extract(b));
            match spec.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Club, Player};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn row(name: &str, club: Option<&str>, age: i64) -> PlayerRow {
        let dob = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let mut row = PlayerRow::new(Player::new(name, dob, Uuid::new_v4(), Uuid::new_v4()));
        row.club_details = club.map(Club::new);
        row.age = Some(age);
        row
    }

    fn names(rows: &[PlayerRow]) -> Vec<&str> {
        rows.iter().map(|r| r.player.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let mut rows = vec![row("Mike", None, 30), row("Joan", None, 20), row("John", None, 25)];
        RowSorter::sort(&mut rows, &SortSpec::new(SortKey::Name, SortOrder::Asc));
        assert_eq!(names(&rows), vec!["Joan", "John", "Mike"]);
    }

    #[test]
    fn test_sort_by_age_descending() {
        let mut rows = vec![row("A", None, 19), row("B", None, 31), row("C", None, 25)];
        RowSorter::sort(&mut rows, &SortSpec::new(SortKey::Age, SortOrder::Desc));
        assert_eq!(names(&rows), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_club_sort_missing_first_ascending() {
        let mut rows = vec![
            row("A", Some("Beta FC"), 20),
            row("B", None, 20),
            row("C", Some("Alpha FC"), 20),
        ];
        RowSorter::sort(&mut rows, &SortSpec::new(SortKey::ClubName, SortOrder::Asc));
        assert_eq!(names(&rows), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_club_sort_missing_last_descending() {
        let mut rows = vec![
            row("A", None, 20),
            row("B", Some("Alpha FC"), 20),
            row("C", Some("Beta FC"), 20),
        ];
        RowSorter::sort(&mut rows, &SortSpec::new(SortKey::ClubName, SortOrder::Desc));
        assert_eq!(names(&rows), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_sort_stable_for_equal_keys() {
        let mut rows = vec![row("c", None, 25), row("a", None, 25), row("b", None, 25)];
        RowSorter::sort(&mut rows, &SortSpec::new(SortKey::Age, SortOrder::Asc));
        assert_eq!(names(&rows), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_value_kind_ordering() {
        let date = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            SortValue::Missing.compare(&SortValue::Number(-1.0)),
            Ordering::Less
        );
        assert_eq!(
            SortValue::Number(1e9).compare(&SortValue::Text("")),
            Ordering::Less
        );
        assert_eq!(
            SortValue::Text("zzz").compare(&SortValue::Date(date)),
            Ordering::Less
        );
    }
}
