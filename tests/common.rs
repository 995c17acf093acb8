//! Common test utilities for building raw listings and record sets.
use bookfilter::prelude::*;

/// A well-formed raw listing as the scraper would produce it.
#[allow(dead_code)]
pub fn raw_book(title: &str, genre: &str, price: &str, rating: &str) -> RawRecord {
    RawRecord::new()
        .with("title", title)
        .with("author", "Test Author")
        .with("genre", genre)
        .with("price", price)
        .with("rating", rating)
}

/// A small batch taken from the first catalogue page of books.toscrape.com,
/// with one broken entry per rejection reason.
///
/// Surviving records (in order): 0, 1, 2, 4, 6.
#[allow(dead_code)]
pub fn scraped_batch() -> Vec<RawRecord> {
    vec![
        RawRecord::new()
            .with("title", "A Light in the Attic")
            .with("author", "Shel Silverstein")
            .with("genre", "Poetry")
            .with("price", "£51.77")
            .with("rating", "Three")
            .with("availability", "In stock (22 available)")
            .with("publication_year", "2016")
            .with("popularity", 32),
        RawRecord::new()
            .with("title", "Tipping the Velvet")
            .with("author", "Sarah Waters")
            .with("genre", "Historical Fiction")
            .with("price", "£53.74")
            .with("rating", "One"),
        RawRecord::new()
            .with("title", "Sharp Objects")
            .with("genre", "Mystery")
            .with("price", "£47.82")
            .with("rating", "Four")
            .with("popularity", 41),
        // Unknown rating token
        RawRecord::new()
            .with("title", "Soumission")
            .with("genre", "Fiction")
            .with("price", "£50.10")
            .with("rating", "Zero"),
        // Missing genre gets defaulted
        RawRecord::new()
            .with("title", "Sapiens")
            .with("author", "Yuval Noah Harari")
            .with("price", "£54.23")
            .with("rating", "Five"),
        // Unparsable price
        RawRecord::new()
            .with("title", "The Requiem Red")
            .with("genre", "Young Adult")
            .with("price", "£abc")
            .with("rating", "One"),
        RawRecord::new()
            .with("title", "The Dirty Little Secrets of Getting Your Dream Job")
            .with("genre", "Business")
            .with("price", "£33.34")
            .with("rating", "Four"),
    ]
}

/// A typed record set with known genres, prices, ratings and popularities.
#[allow(dead_code)]
pub fn sample_records() -> Vec<BookRecord> {
    vec![
        BookRecord::new("Dune", "Frank Herbert", "Fiction", 12.5, Rating::Five).with_popularity(3.0),
        BookRecord::new("Gone Girl", "Gillian Flynn", "Mystery", 8.0, Rating::Four).with_popularity(5.0),
        BookRecord::new("Emma", "Jane Austen", "Fiction", 4.0, Rating::Two).with_popularity(1.0),
        BookRecord::new("Rebecca", "Daphne du Maurier", "Mystery", 9.99, Rating::Three).with_popularity(5.0),
    ]
}

#[allow(dead_code)]
pub fn titles(records: &[BookRecord]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}
