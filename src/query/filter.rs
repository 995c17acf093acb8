use crate::error::QueryError;
use crate::record::{ALL_GENRES, BookRecord};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Genre restriction used by both filtering and random picks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    pub fn matches(&self, record: &BookRecord) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(genre) => record.genre == *genre,
        }
    }
}

impl From<&str> for GenreFilter {
    /// `"All"` is the no-restriction sentinel; every other string is an exact genre.
    fn from(genre: &str) -> Self {
        if genre == ALL_GENRES {
            GenreFilter::All
        } else {
            GenreFilter::Only(genre.to_string())
        }
    }
}

impl From<String> for GenreFilter {
    fn from(genre: String) -> Self {
        if genre == ALL_GENRES {
            GenreFilter::All
        } else {
            GenreFilter::Only(genre)
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str(ALL_GENRES),
            GenreFilter::Only(genre) => f.write_str(genre),
        }
    }
}

/// The query configuration accepted by `QueryEngine::query`.
///
/// Every option is independent and absent options impose no constraint. The
/// options are validated when the query runs, so building one never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub genre: GenreFilter,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<i64>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genre(mut self, genre: impl Into<GenreFilter>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn min_price(mut self, price: f64) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: f64) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn min_rating(mut self, rating: i64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Validates the options and turns them into a conjunction of predicates.
    pub fn compile(&self) -> Result<CompiledFilter, QueryError> {
        let mut predicates = Vec::new();

        if let GenreFilter::Only(genre) = &self.genre {
            predicates.push(Predicate::Genre(genre.clone()));
        }
        if let Some(min) = self.min_price {
            predicates.push(Predicate::MinPrice(validate_price("min_price", min)?));
        }
        if let Some(max) = self.max_price {
            predicates.push(Predicate::MaxPrice(validate_price("max_price", max)?));
        }
        if let Some(rating) = self.min_rating {
            predicates.push(Predicate::MinRating(validate_rating(rating)?));
        }

        Ok(CompiledFilter { predicates })
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<f64, QueryError> {
    if value.is_nan() {
        return Err(QueryError::InvalidFilterInput {
            field,
            value: value.to_string(),
            reason: "is not a number",
        });
    }
    if value < 0.0 {
        return Err(QueryError::InvalidFilterInput {
            field,
            value: value.to_string(),
            reason: "must not be negative",
        });
    }
    Ok(value)
}

fn validate_rating(value: i64) -> Result<u8, QueryError> {
    match u8::try_from(value) {
        Ok(rating @ 1..=5) => Ok(rating),
        _ => Err(QueryError::InvalidFilterInput {
            field: "min_rating",
            value: value.to_string(),
            reason: "must be between 1 and 5",
        }),
    }
}

/// A single validated condition on a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Genre(String),
    MinPrice(f64),
    MaxPrice(f64),
    MinRating(u8),
}

impl Predicate {
    pub fn matches(&self, record: &BookRecord) -> bool {
        match self {
            Predicate::Genre(genre) => record.genre == *genre,
            Predicate::MinPrice(min) => record.price >= *min,
            Predicate::MaxPrice(max) => record.price <= *max,
            Predicate::MinRating(min) => record.rating_numeric() >= *min,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Genre(genre) => write!(f, "genre == {:?}", genre),
            Predicate::MinPrice(min) => write!(f, "price >= {}", min),
            Predicate::MaxPrice(max) => write!(f, "price <= {}", max),
            Predicate::MinRating(min) => write!(f, "rating_numeric >= {}", min),
        }
    }
}

/// A validated `FilterSpec`: all predicates must hold for a record to pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    predicates: Vec<Predicate>,
}

impl CompiledFilter {
    pub fn matches(&self, record: &BookRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Display for CompiledFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.predicates.is_empty() {
            return f.write_str("true");
        }
        f.write_str(&self.predicates.iter().join(" AND "))
    }
}
