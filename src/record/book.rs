use crate::error::RecordRejected;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value substituted for a missing author or genre.
pub const UNKNOWN: &str = "Unknown";

/// Genre selector meaning "no genre restriction".
pub const ALL_GENRES: &str = "All";

/// Star rating as scraped from the listing's CSS class (`star-rating Three`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::One,
        Rating::Two,
        Rating::Three,
        Rating::Four,
        Rating::Five,
    ];

    /// The fixed ordinal of the rating, always in `1..=5`.
    pub fn numeric(self) -> u8 {
        match self {
            Rating::One => 1,
            Rating::Two => 2,
            Rating::Three => 3,
            Rating::Four => 4,
            Rating::Five => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::One => "One",
            Rating::Two => "Two",
            Rating::Three => "Three",
            Rating::Four => "Four",
            Rating::Five => "Five",
        }
    }
}

impl FromStr for Rating {
    type Err = RecordRejected;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim() {
            "One" => Ok(Rating::One),
            "Two" => Ok(Rating::Two),
            "Three" => Ok(Rating::Three),
            "Four" => Ok(Rating::Four),
            "Five" => Ok(Rating::Five),
            other => Err(RecordRejected::UnknownRating(other.to_string())),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, fully-typed book listing.
///
/// Records are produced by the `Normalizer` and never mutated afterwards; the
/// `QueryEngine` only ever hands out clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: f64,
    pub rating: Rating,
    pub popularity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<u32>,
}

impl BookRecord {
    /// Creates a record whose popularity is derived from the rating.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        price: f64,
        rating: Rating,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            price,
            rating,
            popularity: derived_popularity(rating),
            publication_year: None,
            in_stock: None,
        }
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn with_publication_year(mut self, year: i32) -> Self {
        self.publication_year = Some(year);
        self
    }

    pub fn with_in_stock(mut self, count: u32) -> Self {
        self.in_stock = Some(count);
        self
    }

    pub fn rating_numeric(&self) -> u8 {
        self.rating.numeric()
    }
}

/// Popularity used when the source supplies none.
pub fn derived_popularity(rating: Rating) -> f64 {
    f64::from(rating.numeric()) * 2.0
}
