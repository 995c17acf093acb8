//! Aggregate views over a record set.
//!
//! These are read-only helpers for reports; they take any slice of records, so
//! they work equally on a full `Snapshot` and on a query result.

use crate::record::BookRecord;
use crate::query::SortKey;
use ahash::AHashMap;
use serde::Serialize;
use std::fmt;

/// Per-genre statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSummary {
    pub genre: String,
    pub count: usize,
    pub mean_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub mean_rating: f64,
    pub mean_popularity: f64,
}

/// Summarizes each genre present in `records`, sorted by genre name.
pub fn genre_summaries(records: &[BookRecord]) -> Vec<GenreSummary> {
    let mut groups: AHashMap<&str, Vec<&BookRecord>> = AHashMap::new();
    for record in records {
        groups.entry(record.genre.as_str()).or_default().push(record);
    }

    let mut summaries: Vec<GenreSummary> = groups
        .into_iter()
        .map(|(genre, members)| {
            let count = members.len();
            let n = count as f64;
            GenreSummary {
                genre: genre.to_string(),
                count,
                mean_price: members.iter().map(|r| r.price).sum::<f64>() / n,
                min_price: members.iter().map(|r| r.price).fold(f64::INFINITY, f64::min),
                max_price: members.iter().map(|r| r.price).fold(f64::NEG_INFINITY, f64::max),
                mean_rating: members.iter().map(|r| f64::from(r.rating_numeric())).sum::<f64>() / n,
                mean_popularity: members.iter().map(|r| r.popularity).sum::<f64>() / n,
            }
        })
        .collect();
    summaries.sort_by(|a, b| a.genre.cmp(&b.genre));
    summaries
}

/// Price tercile a record falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PriceBand {
    Low,
    Medium,
    High,
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceBand::Low => f.write_str("Low"),
            PriceBand::Medium => f.write_str("Medium"),
            PriceBand::High => f.write_str("High"),
        }
    }
}

/// Cut points splitting a record set into three equally populated price bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBands {
    /// Upper bound (inclusive) of the `Low` band.
    pub low_max: f64,
    /// Upper bound (inclusive) of the `Medium` band.
    pub medium_max: f64,
}

impl PriceBands {
    /// Returns `None` for an empty record set.
    pub fn from_records(records: &[BookRecord]) -> Option<Self> {
        let mut prices: Vec<f64> = records.iter().map(|r| r.price).collect();
        if prices.is_empty() {
            return None;
        }
        prices.sort_by(f64::total_cmp);
        Some(Self {
            low_max: quantile(&prices, 1.0 / 3.0),
            medium_max: quantile(&prices, 2.0 / 3.0),
        })
    }

    pub fn band(&self, price: f64) -> PriceBand {
        if price <= self.low_max {
            PriceBand::Low
        } else if price <= self.medium_max {
            PriceBand::Medium
        } else {
            PriceBand::High
        }
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// The `n` most popular records, ties keeping their input order.
pub fn top_by_popularity(records: &[BookRecord], n: usize) -> Vec<BookRecord> {
    let mut ranked = records.to_vec();
    SortKey::Popularity.sort(&mut ranked);
    ranked.truncate(n);
    ranked
}
