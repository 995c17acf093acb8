//! Prelude module for convenient imports
//!
//! Re-exports the types needed to normalize raw listings and query them.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookfilter::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let raw = bookfilter::source::load("scraped_books.csv")?;
//! let mut engine = QueryEngine::new();
//! engine.replace(Normalizer::default().normalize(raw));
//!
//! let fiction = engine.query(&FilterSpec::new().genre("Fiction"), Some(SortKey::Popularity))?;
//! println!("{} fiction titles", fiction.len());
//! # Ok(())
//! # }
//! ```

// Pipeline
pub use crate::normalizer::{NormalizeReport, Normalizer, NormalizerBuilder, Rejection};
pub use crate::query::{FilterSpec, GenreFilter, QueryEngine, Snapshot, SortKey};

// Records
pub use crate::record::{ALL_GENRES, BookRecord, IntoRawRecord, RawRecord, Rating, UNKNOWN};

// Error types
pub use crate::error::{QueryError, RecordRejected, SourceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
