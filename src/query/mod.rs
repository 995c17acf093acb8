use crate::error::QueryError;
use crate::record::{ALL_GENRES, BookRecord};
use itertools::Itertools;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::sync::Arc;

pub mod filter;
pub mod sort;

pub use filter::{CompiledFilter, FilterSpec, GenreFilter, Predicate};
pub use sort::SortKey;

/// An immutable, shareable view of one loaded record set.
///
/// Cloning is cheap. A snapshot taken before a `replace` keeps showing the old
/// records; it is never partially updated.
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Arc<[BookRecord]>,
    genres: Arc<[String]>,
}

impl Snapshot {
    fn new(records: Vec<BookRecord>) -> Self {
        let genres: Vec<String> = std::iter::once(ALL_GENRES.to_string())
            .chain(
                records
                    .iter()
                    .filter(|record| record.genre != ALL_GENRES)
                    .map(|record| record.genre.clone())
                    .sorted()
                    .dedup(),
            )
            .collect();
        Self {
            records: records.into(),
            genres: genres.into(),
        }
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    /// `"All"` followed by the sorted, distinct genres of the record set.
    ///
    /// A record whose genre is literally `"All"` does not add a second entry;
    /// the sentinel already selects it.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}

#[derive(Debug, Clone, Default)]
enum EngineState {
    #[default]
    Empty,
    Ready(Snapshot),
}

/// Holds the current record set and answers filter, sort and sample queries.
///
/// The engine starts `Empty`, where every query fails with `QueryError::NoData`.
/// The first `replace` makes it ready. Because `replace` takes `&mut self` and
/// queries take `&self`, a query can never observe a half-swapped record set.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    state: EngineState,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that is already ready with the given records.
    pub fn with_records(records: Vec<BookRecord>) -> Self {
        let mut engine = Self::new();
        engine.replace(records);
        engine
    }

    /// Swaps in a new record set. An empty set is allowed and still counts as loaded.
    pub fn replace(&mut self, records: Vec<BookRecord>) {
        let snapshot = Snapshot::new(records);
        tracing::info!(
            records = snapshot.records().len(),
            genres = snapshot.genres().len() - 1,
            "Replaced record set"
        );
        self.state = EngineState::Ready(snapshot);
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// Number of records held, zero when nothing is loaded.
    pub fn len(&self) -> usize {
        match &self.state {
            EngineState::Empty => 0,
            EngineState::Ready(snapshot) => snapshot.records().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Result<Snapshot, QueryError> {
        self.ready().cloned()
    }

    pub fn available_genres(&self) -> Result<&[String], QueryError> {
        Ok(self.ready()?.genres())
    }

    /// Filters the record set and optionally sorts the result.
    ///
    /// The filter is validated before any record is looked at, so an invalid
    /// filter never produces a partial result.
    pub fn query(
        &self,
        filter: &FilterSpec,
        sort_key: Option<SortKey>,
    ) -> Result<Vec<BookRecord>, QueryError> {
        let snapshot = self.ready()?;
        let compiled = filter.compile()?;

        let mut results: Vec<BookRecord> = snapshot
            .records()
            .iter()
            .filter(|record| compiled.matches(record))
            .cloned()
            .collect();

        if let Some(key) = sort_key {
            key.sort(&mut results);
        }

        tracing::debug!(
            filter = %compiled,
            sort = sort_key.map(SortKey::as_str).unwrap_or("none"),
            matched = results.len(),
            "Executed query"
        );
        Ok(results)
    }

    /// Draws one record uniformly at random from the candidate pool.
    pub fn random_pick(&self, genre: impl Into<GenreFilter>) -> Result<BookRecord, QueryError> {
        self.random_pick_with(genre, &mut rand::rng())
    }

    /// Like `random_pick`, with a caller-provided random source.
    pub fn random_pick_with<R>(
        &self,
        genre: impl Into<GenreFilter>,
        rng: &mut R,
    ) -> Result<BookRecord, QueryError>
    where
        R: Rng + ?Sized,
    {
        let genre = genre.into();
        let candidates: Vec<&BookRecord> = self
            .ready()?
            .records()
            .iter()
            .filter(|record| genre.matches(record))
            .collect();

        candidates
            .choose(rng)
            .map(|record| (*record).clone())
            .ok_or_else(|| QueryError::EmptySelection {
                genre: genre.to_string(),
            })
    }

    fn ready(&self) -> Result<&Snapshot, QueryError> {
        match &self.state {
            EngineState::Empty => Err(QueryError::NoData),
            EngineState::Ready(snapshot) => Ok(snapshot),
        }
    }
}
