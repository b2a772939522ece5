//! Staged listing pipelines
//!
//! A [`Pipeline`] is an ordered list of [`Stage`]s executed over a scan of
//! `players` in store order:
//!
//! 1. derive age
//! 2. derive rating totals
//! 3. left-join club, country, position
//! 4. match
//! 5. sort
//! 6. skip
//! 7. limit
//!
//! The page pipeline runs every stage. The count pipeline keeps only the
//! stages its match predicate reads, then counts what survives.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::store::LeagueStore;

use super::errors::QueryResult;
use super::params::ListPlayersParams;
use super::predicate::PlayerFilter;
use super::row::{derive_age, PlayerRow, RatingTotals};
use super::sorter::{RowSorter, SortSpec};

/// Referenced collection joined by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// `currentClub.club` → `clubteams`
    Club,
    /// `country` → `countries`
    Country,
    /// `position` → `positions`
    Position,
}

/// One pipeline step
#[derive(Debug, Clone)]
pub enum Stage {
    DeriveAge { now: DateTime<Utc> },
    DeriveRatings,
    Join(Join),
    Match(PlayerFilter),
    Sort(SortSpec),
    Skip(usize),
    Limit(usize),
}

impl Stage {
    /// Short name for logs and explain output
    pub fn name(&self) -> &'static str {
        match self {
            Stage::DeriveAge { .. } => "derive_age",
            Stage::DeriveRatings => "derive_ratings",
            Stage::Join(Join::Club) => "join_club",
            Stage::Join(Join::Country) => "join_country",
            Stage::Join(Join::Position) => "join_position",
            Stage::Match(_) => "match",
            Stage::Sort(_) => "sort",
            Stage::Skip(_) => "skip",
            Stage::Limit(_) => "limit",
        }
    }
}

/// An ordered sequence of stages
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Pipeline producing one page of fully joined rows
    pub fn page(params: &ListPlayersParams, filter: &PlayerFilter, now: DateTime<Utc>) -> Self {
        let sort = SortSpec::new(params.sort_by.resolve(), params.sort_order);

        Self {
            stages: vec![
                Stage::DeriveAge { now },
                Stage::DeriveRatings,
                Stage::Join(Join::Club),
                Stage::Join(Join::Country),
                Stage::Join(Join::Position),
                Stage::Match(filter.clone()),
                Stage::Sort(sort),
                Stage::Skip(params.skip()),
                Stage::Limit(params.per_page),
            ],
        }
    }

    /// Pipeline selecting every row the filter matches, with only the
    /// derivations and joins the filter reads
    pub fn count(filter: &PlayerFilter, now: DateTime<Utc>) -> Self {
        let needs = filter.requirements();
        let mut stages = Vec::new();

        if needs.age {
            stages.push(Stage::DeriveAge { now });
        }
        if needs.ratings {
            stages.push(Stage::DeriveRatings);
        }
        if needs.club_join {
            stages.push(Stage::Join(Join::Club));
        }
        if needs.country_join {
            stages.push(Stage::Join(Join::Country));
        }
        if needs.position_join {
            stages.push(Stage::Join(Join::Position));
        }
        stages.push(Stage::Match(filter.clone()));

        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Stage names in execution order
    pub fn describe(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Runs the pipeline and returns the surviving rows
    pub async fn run<S: LeagueStore>(&self, store: &S) -> QueryResult<Vec<PlayerRow>> {
        let mut rows: Vec<PlayerRow> = store
            .players()
            .await?
            .into_iter()
            .map(PlayerRow::new)
            .collect();

        for stage in &self.stages {
            rows = match stage {
                Stage::DeriveAge { now } => {
                    for row in &mut rows {
                        row.age = Some(derive_age(row.player.date_of_birth, *now));
                    }
                    rows
                }
                Stage::DeriveRatings => {
                    for row in &mut rows {
                        row.totals = Some(RatingTotals::from_history(&row.player.rating_history));
                    }
                    rows
                }
                Stage::Join(join) => {
                    apply_join(store, *join, &mut rows).await?;
                    rows
                }
                Stage::Match(filter) => rows.into_iter().filter(|r| filter.matches(r)).collect(),
                Stage::Sort(spec) => {
                    RowSorter::sort(&mut rows, spec);
                    rows
                }
                Stage::Skip(n) => rows.into_iter().skip(*n).collect(),
                Stage::Limit(n) => rows.into_iter().take(*n).collect(),
            };
        }

        Ok(rows)
    }

    /// Runs the pipeline and returns how many rows survive
    pub async fn count_rows<S: LeagueStore>(&self, store: &S) -> QueryResult<u64> {
        Ok(self.run(store).await?.len() as u64)
    }
}

/// Distinct ids in first-seen order
fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

/// Attaches joined documents; rows without a match keep `None`
async fn apply_join<S: LeagueStore>(
    store: &S,
    join: Join,
    rows: &mut [PlayerRow],
) -> QueryResult<()> {
    match join {
        Join::Club => {
            let ids = distinct(rows.iter().filter_map(|r| r.player.club_id()));
            let clubs = fetch_if_any(&ids, store.clubs_by_id(&ids)).await?;
            for row in rows.iter_mut() {
                row.club_details = row.player.club_id().and_then(|id| clubs.get(&id).cloned());
            }
        }
        Join::Country => {
            let ids = distinct(rows.iter().map(|r| r.player.country));
            let countries = fetch_if_any(&ids, store.countries_by_id(&ids)).await?;
            for row in rows.iter_mut() {
                row.country_details = countries.get(&row.player.country).cloned();
            }
        }
        Join::Position => {
            let ids = distinct(rows.iter().map(|r| r.player.position));
            let positions = fetch_if_any(&ids, store.positions_by_id(&ids)).await?;
            for row in rows.iter_mut() {
                row.position_details = positions.get(&row.player.position).cloned();
            }
        }
    }
    Ok(())
}

/// Skips the store round trip when there is nothing to look up
async fn fetch_if_any<T, F>(ids: &[Uuid], lookup: F) -> QueryResult<HashMap<Uuid, T>>
where
    F: std::future::Future<Output = crate::store::StoreResult<HashMap<Uuid, T>>>,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(lookup.await?)
}
