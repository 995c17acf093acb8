//! # bookfilter - Book Listing Normalization and Query Engine
//!
//! **bookfilter** turns scraped, loosely-typed book listings into a consistent typed
//! record set and answers filter, sort and random-pick queries over it. Malformed
//! listings are dropped one by one; they never abort a batch.
//!
//! ## Core Workflow
//!
//! 1.  **Collect Raw Records**: Load them with [`source::load`] or build [`RawRecord`]s
//!     yourself (implement [`IntoRawRecord`] for your scraper's output type).
//! 2.  **Normalize**: Run them through a [`Normalizer`]. Prices are parsed from
//!     currency-prefixed strings, ratings mapped from `One`..`Five`, missing genres and
//!     authors defaulted to `"Unknown"`, and a popularity derived where the source has none.
//! 3.  **Load**: Hand the records to a [`QueryEngine`] with `replace`. Every refresh
//!     replaces the whole set.
//! 4.  **Query**: Describe the selection with a [`FilterSpec`], optionally sort by a
//!     [`SortKey`], or draw a random record from a genre.
//!
//! ## Quick Start
//!
//! ```rust
//! use bookfilter::prelude::*;
//!
//! let raw = vec![
//!     RawRecord::new()
//!         .with("title", "A Light in the Attic")
//!         .with("author", "Shel Silverstein")
//!         .with("genre", "Poetry")
//!         .with("price", "£51.77")
//!         .with("rating", "Three"),
//!     RawRecord::new()
//!         .with("title", "Tipping the Velvet")
//!         .with("genre", "Historical Fiction")
//!         .with("price", "£53.74")
//!         .with("rating", "One"),
//!     // Dropped: "Zero" is not a rating.
//!     RawRecord::new()
//!         .with("title", "Soumission")
//!         .with("price", "£50.10")
//!         .with("rating", "Zero"),
//! ];
//!
//! let report = Normalizer::default().normalize_with_report(raw);
//! assert_eq!(report.records.len(), 2);
//! assert_eq!(report.rejected.len(), 1);
//!
//! let mut engine = QueryEngine::new();
//! engine.replace(report.records);
//!
//! assert_eq!(
//!     engine.available_genres()?,
//!     ["All", "Historical Fiction", "Poetry"]
//! );
//!
//! let filter = FilterSpec::new().min_price(52.0);
//! let results = engine.query(&filter, Some(SortKey::Price))?;
//! assert_eq!(results[0].title, "Tipping the Velvet");
//! assert_eq!(results[0].author, "Unknown");
//!
//! let pick = engine.random_pick("Poetry")?;
//! assert_eq!(pick.rating_numeric(), 3);
//! # Ok::<(), bookfilter::error::QueryError>(())
//! ```

pub mod analysis;
pub mod error;
pub mod normalizer;
pub mod prelude;
pub mod query;
pub mod record;
pub mod source;

pub use normalizer::{NormalizeReport, Normalizer};
pub use query::{FilterSpec, QueryEngine, SortKey};
pub use record::{BookRecord, IntoRawRecord, RawRecord, Rating};
