use crate::error::QueryError;
use crate::record::BookRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Numeric field a query result can be ordered by. Ordering is always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Price,
    RatingNumeric,
    Popularity,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Price, SortKey::RatingNumeric, SortKey::Popularity];

    pub fn value(self, record: &BookRecord) -> f64 {
        match self {
            SortKey::Price => record.price,
            SortKey::RatingNumeric => f64::from(record.rating_numeric()),
            SortKey::Popularity => record.popularity,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::RatingNumeric => "rating_numeric",
            SortKey::Popularity => "popularity",
        }
    }

    /// Stable descending sort: records with equal keys keep their relative order.
    ///
    /// Keys compare numerically, so `-0.0` and `0.0` tie.
    pub fn sort(self, records: &mut [BookRecord]) {
        records.sort_by(|a, b| {
            self.value(b)
                .partial_cmp(&self.value(a))
                .unwrap_or(Ordering::Equal)
        });
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| QueryError::InvalidFilterInput {
                field: "sort_key",
                value: name.to_string(),
                reason: "must be one of price, rating_numeric, popularity",
            })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
