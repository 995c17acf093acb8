//! Tests for the query engine: state handling, filters, sorting and sampling.
mod common;
use bookfilter::prelude::*;
use common::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_empty_engine_rejects_every_operation() {
    let engine = QueryEngine::new();

    assert!(!engine.is_ready());
    assert_eq!(engine.available_genres(), Err(QueryError::NoData));
    assert_eq!(engine.query(&FilterSpec::new(), None), Err(QueryError::NoData));
    assert_eq!(engine.random_pick(ALL_GENRES), Err(QueryError::NoData));
    assert!(engine.snapshot().is_err());
}

#[test]
fn test_replace_with_empty_set_is_ready_but_has_no_candidates() {
    let mut engine = QueryEngine::new();
    engine.replace(Vec::new());

    assert!(engine.is_ready());
    assert!(engine.is_empty());
    assert_eq!(engine.available_genres().unwrap(), ["All"]);
    assert_eq!(engine.query(&FilterSpec::new(), None), Ok(Vec::new()));
    assert_eq!(
        engine.random_pick(ALL_GENRES),
        Err(QueryError::EmptySelection {
            genre: "All".to_string()
        })
    );
}

#[test]
fn test_available_genres_are_deduplicated_and_sorted() {
    let records = vec![
        BookRecord::new("A", "X", "Fiction", 1.0, Rating::One),
        BookRecord::new("B", "X", "Mystery", 1.0, Rating::One),
        BookRecord::new("C", "X", "Fiction", 1.0, Rating::One),
    ];
    let engine = QueryEngine::with_records(records);

    assert_eq!(engine.available_genres().unwrap(), ["All", "Fiction", "Mystery"]);
}

#[test]
fn test_empty_filter_without_sort_is_identity() {
    let engine = QueryEngine::with_records(sample_records());
    let results = engine.query(&FilterSpec::default(), None).unwrap();

    assert_eq!(results, sample_records());
}

#[test]
fn test_genre_filter_is_exact_and_idempotent() {
    let engine = QueryEngine::with_records(sample_records());
    let filter = FilterSpec::new().genre("Fiction");

    let first = engine.query(&filter, None).unwrap();
    assert_eq!(titles(&first), vec!["Dune", "Emma"]);
    assert!(first.iter().all(|r| r.genre == "Fiction"));

    let second = QueryEngine::with_records(first.clone())
        .query(&filter, None)
        .unwrap();
    assert_eq!(first, second);

    let lowercase = engine.query(&FilterSpec::new().genre("fiction"), None).unwrap();
    assert!(lowercase.is_empty());
}

#[test]
fn test_all_sentinel_imposes_no_genre_restriction() {
    let engine = QueryEngine::with_records(sample_records());
    let results = engine.query(&FilterSpec::new().genre("All"), None).unwrap();

    assert_eq!(results.len(), 4);
}

#[test]
fn test_price_bounds_are_inclusive_and_conjunctive() {
    let engine = QueryEngine::with_records(sample_records());
    let filter = FilterSpec::new().min_price(8.0).max_price(12.5);

    let results = engine.query(&filter, None).unwrap();
    assert_eq!(titles(&results), vec!["Dune", "Gone Girl", "Rebecca"]);
}

#[test]
fn test_contradictory_price_bounds_return_empty() {
    let engine = QueryEngine::with_records(sample_records());
    let filter = FilterSpec::new().min_price(10.0).max_price(5.0);

    assert_eq!(engine.query(&filter, None), Ok(Vec::new()));
}

#[test]
fn test_min_rating_filter() {
    let engine = QueryEngine::with_records(sample_records());
    let results = engine.query(&FilterSpec::new().min_rating(4), None).unwrap();

    assert_eq!(titles(&results), vec!["Dune", "Gone Girl"]);
}

#[test]
fn test_all_predicates_combine_with_and() {
    let engine = QueryEngine::with_records(sample_records());
    let filter = FilterSpec::new()
        .genre("Mystery")
        .min_price(5.0)
        .max_price(9.0)
        .min_rating(3);

    let results = engine.query(&filter, None).unwrap();
    assert_eq!(titles(&results), vec!["Gone Girl"]);
}

#[test]
fn test_invalid_filter_input_is_rejected() {
    let engine = QueryEngine::with_records(sample_records());

    for filter in [
        FilterSpec::new().min_rating(6),
        FilterSpec::new().min_rating(0),
        FilterSpec::new().min_rating(-1),
        FilterSpec::new().min_price(-0.01),
        FilterSpec::new().max_price(-5.0),
        FilterSpec::new().max_price(f64::NAN),
    ] {
        let result = engine.query(&filter, Some(SortKey::Price));
        assert!(
            matches!(result, Err(QueryError::InvalidFilterInput { .. })),
            "expected InvalidFilterInput for {:?}, got {:?}",
            filter,
            result
        );
    }
}

#[test]
fn test_invalid_rating_error_names_the_field() {
    let engine = QueryEngine::with_records(sample_records());
    let err = engine
        .query(&FilterSpec::new().min_rating(6), None)
        .unwrap_err();

    assert_eq!(
        err,
        QueryError::InvalidFilterInput {
            field: "min_rating",
            value: "6".to_string(),
            reason: "must be between 1 and 5",
        }
    );
}

#[test]
fn test_sort_by_popularity_is_descending_and_stable() {
    // Popularity values in order: [3, 5, 1, 5]
    let engine = QueryEngine::with_records(sample_records());
    let results = engine
        .query(&FilterSpec::new(), Some(SortKey::Popularity))
        .unwrap();

    let popularity: Vec<f64> = results.iter().map(|r| r.popularity).collect();
    assert_eq!(popularity, vec![5.0, 5.0, 3.0, 1.0]);
    assert_eq!(titles(&results), vec!["Gone Girl", "Rebecca", "Dune", "Emma"]);
}

#[test]
fn test_sort_by_price_and_rating() {
    let engine = QueryEngine::with_records(sample_records());

    let by_price = engine.query(&FilterSpec::new(), Some(SortKey::Price)).unwrap();
    assert_eq!(titles(&by_price), vec!["Dune", "Rebecca", "Gone Girl", "Emma"]);

    let by_rating = engine
        .query(&FilterSpec::new(), Some(SortKey::RatingNumeric))
        .unwrap();
    assert_eq!(titles(&by_rating), vec!["Dune", "Gone Girl", "Rebecca", "Emma"]);
}

#[test]
fn test_zero_prices_tie_regardless_of_sign() {
    let raw = vec![
        raw_book("First", "Fiction", "£-0.00", "One"),
        raw_book("Second", "Fiction", "£0.00", "One"),
    ];
    let records = Normalizer::default().normalize(raw);
    assert!(records.iter().all(|r| r.price == 0.0 && r.price.is_sign_positive()));

    let engine = QueryEngine::with_records(records);
    let results = engine.query(&FilterSpec::new(), Some(SortKey::Price)).unwrap();
    assert_eq!(titles(&results), vec!["First", "Second"]);

    // Records built directly can still carry a negative zero.
    let direct = QueryEngine::with_records(vec![
        BookRecord::new("Negative", "X", "Fiction", -0.0, Rating::One),
        BookRecord::new("Positive", "X", "Fiction", 0.0, Rating::One),
    ]);
    let results = direct.query(&FilterSpec::new(), Some(SortKey::Price)).unwrap();
    assert_eq!(titles(&results), vec!["Negative", "Positive"]);
}

#[test]
fn test_genre_named_all_is_not_listed_twice() {
    let engine = QueryEngine::with_records(vec![
        BookRecord::new("A", "X", "All", 1.0, Rating::One),
        BookRecord::new("B", "X", "Poetry", 1.0, Rating::One),
    ]);

    assert_eq!(engine.available_genres().unwrap(), ["All", "Poetry"]);
    assert_eq!(engine.query(&FilterSpec::new().genre("All"), None).unwrap().len(), 2);
}

#[test]
fn test_sort_key_names() {
    assert_eq!("price".parse::<SortKey>(), Ok(SortKey::Price));
    assert_eq!("rating_numeric".parse::<SortKey>(), Ok(SortKey::RatingNumeric));
    assert_eq!("popularity".parse::<SortKey>(), Ok(SortKey::Popularity));
    assert!(matches!(
        "title".parse::<SortKey>(),
        Err(QueryError::InvalidFilterInput { field: "sort_key", .. })
    ));
}

#[test]
fn test_query_does_not_mutate_the_record_set() {
    let engine = QueryEngine::with_records(sample_records());
    let _ = engine
        .query(&FilterSpec::new().genre("Mystery"), Some(SortKey::Price))
        .unwrap();

    assert_eq!(engine.snapshot().unwrap().records(), sample_records().as_slice());
}

#[test]
fn test_replace_swaps_the_whole_set() {
    let mut engine = QueryEngine::with_records(sample_records());
    let before = engine.snapshot().unwrap();

    engine.replace(vec![BookRecord::new("Solo", "X", "Travel", 2.0, Rating::Two)]);

    assert_eq!(engine.available_genres().unwrap(), ["All", "Travel"]);
    assert_eq!(titles(&engine.query(&FilterSpec::new(), None).unwrap()), vec!["Solo"]);
    // A snapshot taken earlier still sees only the old records.
    assert_eq!(before.records().len(), 4);
    assert_eq!(before.genres(), ["All", "Fiction", "Mystery"]);
}

#[test]
fn test_random_pick_respects_genre() {
    let engine = QueryEngine::with_records(sample_records());
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let pick = engine.random_pick_with("Mystery", &mut rng).unwrap();
        assert_eq!(pick.genre, "Mystery");
    }

    assert_eq!(
        engine.random_pick("Poetry"),
        Err(QueryError::EmptySelection {
            genre: "Poetry".to_string()
        })
    );
}

#[test]
fn test_random_pick_is_roughly_uniform() {
    let engine = QueryEngine::with_records(vec![
        BookRecord::new("Left", "X", "Fiction", 1.0, Rating::One),
        BookRecord::new("Right", "X", "Fiction", 1.0, Rating::One),
    ]);
    let mut rng = StdRng::seed_from_u64(42);

    let draws = 10_000;
    let left = (0..draws)
        .map(|_| engine.random_pick_with(ALL_GENRES, &mut rng).unwrap())
        .filter(|pick| pick.title == "Left")
        .count();

    // Five standard deviations either side of 5000.
    assert!((4750..=5250).contains(&left), "left drawn {} times", left);
}
