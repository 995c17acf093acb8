//! Integration tests for bookfilter
//!
//! End-to-end tests that load a scraped file, normalize it and query the result.
//!
mod common;
use bookfilter::prelude::*;
use bookfilter::source;
use common::*;
use std::fs;
use tempfile::TempDir;

const SCRAPED_CSV: &str = "\
title,author,genre,price,rating,availability,publication_year,popularity
A Light in the Attic,Shel Silverstein,Poetry,£51.77,Three,In stock (22 available),2016,30
Tipping the Velvet,Sarah Waters,Historical Fiction,£53.74,One,In stock (20 available),N/A,10
Soumission,Michel Houellebecq,Fiction,£50.10,Zero,In stock (20 available),2015,10
Sharp Objects,Gillian Flynn,Mystery,£47.82,Four,In stock (20 available),2006,40
Sapiens,Yuval Noah Harari,,£54.23,Five,In stock (20 available),2011,
The Requiem Red,Unknown,Young Adult,£abc,One,In stock (20 available),2016,10
The Coming Woman,Unknown,Poetry,£17.93,Three,In stock (19 available),N/A,31
";

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn load_engine() -> (QueryEngine, NormalizeReport) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scraped_books.csv");
        fs::write(&path, SCRAPED_CSV).unwrap();

        let raw = source::load(&path).expect("Failed to load scraped data");
        let report = Normalizer::default().normalize_with_report(raw);
        let engine = QueryEngine::with_records(report.records.clone());
        (engine, report)
    }

    #[test]
    fn test_csv_to_query_pipeline() {
        let (engine, report) = load_engine();

        assert_eq!(report.total(), 7);
        assert_eq!(engine.len(), 5);
        let rejected: Vec<usize> = report.rejected.iter().map(|r| r.index).collect();
        assert_eq!(rejected, vec![2, 5]);

        assert_eq!(
            engine.available_genres().unwrap(),
            ["All", "Historical Fiction", "Mystery", "Poetry", "Unknown"]
        );
    }

    #[test]
    fn test_gui_style_filter_session() {
        let (engine, _) = load_engine();

        let poetry = engine
            .query(&FilterSpec::new().genre("Poetry"), Some(SortKey::Popularity))
            .unwrap();
        assert_eq!(titles(&poetry), vec!["The Coming Woman", "A Light in the Attic"]);

        let affordable = engine
            .query(
                &FilterSpec::new().max_price(52.0).min_rating(3),
                Some(SortKey::Price),
            )
            .unwrap();
        assert_eq!(
            titles(&affordable),
            vec!["A Light in the Attic", "Sharp Objects", "The Coming Woman"]
        );

        // Sapiens had no popularity column value, so it was derived from Five.
        let sapiens = engine
            .query(&FilterSpec::new().genre(UNKNOWN), None)
            .unwrap();
        assert_eq!(sapiens[0].popularity, 10.0);
        assert_eq!(sapiens[0].in_stock, Some(20));
    }

    #[test]
    fn test_refresh_replaces_previous_listing() {
        let (mut engine, _) = load_engine();

        let refreshed = Normalizer::default().normalize(vec![raw_book(
            "It's Only the Himalayas",
            "Travel",
            "£45.17",
            "Two",
        )]);
        engine.replace(refreshed);

        assert_eq!(engine.available_genres().unwrap(), ["All", "Travel"]);
        assert_eq!(
            engine.random_pick("Poetry"),
            Err(QueryError::EmptySelection {
                genre: "Poetry".to_string()
            })
        );
        assert_eq!(engine.random_pick("Travel").unwrap().price, 45.17);
    }

    #[test]
    fn test_invalid_input_leaves_engine_usable() {
        let (engine, _) = load_engine();

        assert!(engine.query(&FilterSpec::new().min_price(-1.0), None).is_err());
        assert_eq!(engine.query(&FilterSpec::new(), None).unwrap().len(), 5);
    }
}
