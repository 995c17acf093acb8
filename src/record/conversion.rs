use super::raw::RawRecord;

/// A trait for scraper output types that can be handed to the `Normalizer`.
///
/// This is the extension point for plugging a custom scraper into the pipeline.
/// Implement it on whatever struct your scraper fills in and the normalizer will
/// take care of validation and defaulting.
///
/// # Example
///
/// ```rust
/// use bookfilter::prelude::*;
///
/// struct ScrapedListing {
///     title: String,
///     price_text: String,
///     star_class: String,
/// }
///
/// impl IntoRawRecord for ScrapedListing {
///     fn into_raw_record(self) -> RawRecord {
///         RawRecord::new()
///             .with("title", self.title)
///             .with("price", self.price_text)
///             .with("rating", self.star_class)
///     }
/// }
///
/// let listing = ScrapedListing {
///     title: "Sharp Objects".to_string(),
///     price_text: "£47.82".to_string(),
///     star_class: "Four".to_string(),
/// };
/// let records = Normalizer::default().normalize(vec![listing.into_raw_record()]);
/// assert_eq!(records[0].genre, "Unknown");
/// ```
pub trait IntoRawRecord {
    /// Consumes the value and converts it into a loosely-typed raw record.
    fn into_raw_record(self) -> RawRecord;
}

impl IntoRawRecord for RawRecord {
    fn into_raw_record(self) -> RawRecord {
        self
    }
}

impl IntoRawRecord for serde_json::Map<String, serde_json::Value> {
    fn into_raw_record(self) -> RawRecord {
        RawRecord::from(self)
    }
}
