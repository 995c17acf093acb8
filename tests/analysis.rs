//! Tests for the aggregate report helpers.
mod common;
use bookfilter::analysis::{PriceBand, PriceBands, genre_summaries, top_by_popularity};
use bookfilter::prelude::*;
use common::*;

#[test]
fn test_genre_summaries_are_sorted_with_means() {
    let summaries = genre_summaries(&sample_records());

    assert_eq!(summaries.len(), 2);
    let fiction = &summaries[0];
    assert_eq!(fiction.genre, "Fiction");
    assert_eq!(fiction.count, 2);
    assert_eq!(fiction.mean_price, 8.25);
    assert_eq!(fiction.min_price, 4.0);
    assert_eq!(fiction.max_price, 12.5);
    assert_eq!(fiction.mean_rating, 3.5);
    assert_eq!(fiction.mean_popularity, 2.0);

    assert_eq!(summaries[1].genre, "Mystery");
    assert_eq!(summaries[1].count, 2);
}

#[test]
fn test_genre_summaries_of_nothing() {
    assert!(genre_summaries(&[]).is_empty());
}

#[test]
fn test_price_bands_split_into_terciles() {
    let records: Vec<BookRecord> = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]
        .iter()
        .map(|&price| BookRecord::new("B", "A", "Fiction", price, Rating::One))
        .collect();
    let bands = PriceBands::from_records(&records).unwrap();

    assert_eq!(bands.low_max, 30.0);
    assert_eq!(bands.medium_max, 50.0);
    assert_eq!(bands.band(10.0), PriceBand::Low);
    assert_eq!(bands.band(30.0), PriceBand::Low);
    assert_eq!(bands.band(40.0), PriceBand::Medium);
    assert_eq!(bands.band(70.0), PriceBand::High);
}

#[test]
fn test_price_bands_need_records() {
    assert_eq!(PriceBands::from_records(&[]), None);

    let single = vec![BookRecord::new("Only", "A", "Fiction", 9.0, Rating::Two)];
    let bands = PriceBands::from_records(&single).unwrap();
    assert_eq!(bands.band(9.0), PriceBand::Low);
}

#[test]
fn test_top_by_popularity_keeps_tie_order() {
    let top = top_by_popularity(&sample_records(), 3);
    assert_eq!(titles(&top), vec!["Gone Girl", "Rebecca", "Dune"]);

    assert_eq!(top_by_popularity(&sample_records(), 10).len(), 4);
}
