//! Player listing query engine
//!
//! # Execution Flow
//!
//! 1. Parse raw parameters into [`ListPlayersParams`]
//! 2. Build one [`PlayerFilter`] from them
//! 3. Build the page [`Pipeline`] and the count [`Pipeline`] from that filter
//! 4. Run both concurrently against the store
//! 5. Render rows as [`PlayerView`]s and return a [`PlayerPage`]
//!
//! The engine never writes.

mod engine;
mod errors;
mod params;
mod pipeline;
mod predicate;
mod row;
mod sorter;

pub use engine::{ListingEngine, PlayerPage};
pub use errors::{QueryError, QueryResult};
pub use params::{
    AgeGroup, ListPlayersParams, SortField, SortOrder, DEFAULT_PAGE, DEFAULT_PER_PAGE,
    MAX_PER_PAGE,
};
pub use pipeline::{Join, Pipeline, Stage};
pub use predicate::{PlayerFilter, Requirements};
pub use row::{derive_age, PlayerRow, PlayerView, RatingTotals, YEAR_MS};
pub use sorter::{RowSorter, SortKey, SortSpec, SortValue};
