use crate::error::RecordRejected;
use crate::record::{BookRecord, IntoRawRecord, RawField, RawRecord, Rating, UNKNOWN, derived_popularity};
use ahash::AHashSet;

pub mod parsing;

use parsing::*;

/// Currency prefixes stripped from price strings unless configured otherwise.
pub const DEFAULT_CURRENCY_SYMBOLS: [&str; 2] = ["£", "$"];

/// A raw record that was dropped, with its position in the input batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub index: usize,
    pub reason: RecordRejected,
}

/// The outcome of normalizing one batch.
#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    /// Surviving records, in input order.
    pub records: Vec<BookRecord>,
    pub rejected: Vec<Rejection>,
}

impl NormalizeReport {
    pub fn total(&self) -> usize {
        self.records.len() + self.rejected.len()
    }
}

/// Turns loosely-typed raw records into validated `BookRecord`s.
///
/// Normalization never fails as a whole: a record that cannot be repaired is
/// dropped and noted in the `NormalizeReport`.
#[derive(Debug, Clone)]
pub struct Normalizer {
    currency_symbols: Vec<String>,
    dedupe: bool,
}

#[derive(Debug, Clone)]
pub struct NormalizerBuilder {
    currency_symbols: Vec<String>,
    dedupe: bool,
}

impl NormalizerBuilder {
    pub fn new() -> Self {
        Self {
            currency_symbols: DEFAULT_CURRENCY_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            dedupe: false,
        }
    }

    /// Adds a currency prefix on top of the ones already configured.
    pub fn with_currency_symbol(mut self, symbol: &str) -> Self {
        if !self.currency_symbols.iter().any(|s| s == symbol) {
            self.currency_symbols.push(symbol.to_string());
        }
        self
    }

    /// Replaces the configured currency prefixes.
    pub fn with_currency_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.currency_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Drops records whose `(title, author)` pair was already seen in the batch.
    pub fn dedupe(mut self, enabled: bool) -> Self {
        self.dedupe = enabled;
        self
    }

    pub fn build(self) -> Normalizer {
        Normalizer {
            currency_symbols: self.currency_symbols,
            dedupe: self.dedupe,
        }
    }
}

impl Default for NormalizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        NormalizerBuilder::new().build()
    }
}

impl Normalizer {
    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::new()
    }

    pub fn currency_symbols(&self) -> &[String] {
        &self.currency_symbols
    }

    /// Normalizes a batch and returns only the surviving records.
    pub fn normalize<I>(&self, raw_records: I) -> Vec<BookRecord>
    where
        I: IntoIterator,
        I::Item: IntoRawRecord,
    {
        self.normalize_with_report(raw_records).records
    }

    /// Normalizes a batch, keeping track of every rejected record.
    pub fn normalize_with_report<I>(&self, raw_records: I) -> NormalizeReport
    where
        I: IntoIterator,
        I::Item: IntoRawRecord,
    {
        let mut report = NormalizeReport::default();
        let mut seen: AHashSet<(String, String)> = AHashSet::new();

        for (index, item) in raw_records.into_iter().enumerate() {
            let raw = item.into_raw_record();
            let outcome = self.normalize_one(&raw).and_then(|record| {
                if self.dedupe && !seen.insert((record.title.clone(), record.author.clone())) {
                    return Err(RecordRejected::Duplicate {
                        title: record.title,
                        author: record.author,
                    });
                }
                Ok(record)
            });

            match outcome {
                Ok(record) => report.records.push(record),
                Err(reason) => {
                    tracing::debug!(index, reason = %reason, "Dropped raw record");
                    report.rejected.push(Rejection { index, reason });
                }
            }
        }

        tracing::info!(
            accepted = report.records.len(),
            rejected = report.rejected.len(),
            "Normalized raw records"
        );
        report
    }

    /// Runs the per-record steps: price, rating, defaulting, popularity, then
    /// the completeness gate.
    pub fn normalize_one(&self, raw: &RawRecord) -> Result<BookRecord, RecordRejected> {
        let price = parse_price(raw.field("price"), &self.currency_symbols)?;
        let rating = parse_rating(raw.field("rating"))?;
        let genre = text_or_unknown(raw.field("genre"));
        let author = text_or_unknown(raw.field("author"));

        let popularity = match (parse_popularity(raw.field("popularity"))?, rating) {
            (Some(supplied), _) => Some(supplied),
            (None, Some(rating)) => Some(derived_popularity(rating)),
            (None, None) => None,
        };

        let in_stock = match raw.field("in_stock") {
            RawField::Absent => parse_in_stock(raw.field("availability")),
            field => parse_in_stock(field),
        };

        PartialRecord {
            title: raw.text("title"),
            author,
            genre,
            price,
            rating,
            popularity,
            publication_year: parse_year(raw.field("publication_year")),
            in_stock,
        }
        .complete()
    }
}

fn text_or_unknown(field: RawField<'_>) -> String {
    match field {
        RawField::Text(text) => text.to_string(),
        RawField::Number(value) => value.to_string(),
        RawField::Absent | RawField::Other(_) => UNKNOWN.to_string(),
    }
}

/// A record after parsing and defaulting, before the completeness gate.
struct PartialRecord {
    title: Option<String>,
    author: String,
    genre: String,
    price: Option<f64>,
    rating: Option<Rating>,
    popularity: Option<f64>,
    publication_year: Option<i32>,
    in_stock: Option<u32>,
}

impl PartialRecord {
    fn complete(self) -> Result<BookRecord, RecordRejected> {
        let title = self.title.ok_or(RecordRejected::MissingField("title"))?;
        let price = self.price.ok_or(RecordRejected::MissingField("price"))?;
        let rating = self.rating.ok_or(RecordRejected::MissingField("rating"))?;
        if self.genre.is_empty() {
            return Err(RecordRejected::MissingField("genre"));
        }

        let mut record = BookRecord::new(title, self.author, self.genre, price, rating);
        if let Some(popularity) = self.popularity {
            record.popularity = popularity;
        }
        record.publication_year = self.publication_year;
        record.in_stock = self.in_stock;
        Ok(record)
    }
}
