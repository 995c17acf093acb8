use bookfilter::record::{RawRecord, Rating};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate raw book listings for the bookfilter CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_books.json")]
    output: String,

    /// The number of listings to generate
    #[arg(short, long, default_value_t = 50)]
    count: usize,

    /// Fraction of listings that are deliberately malformed
    #[arg(long, default_value_t = 0.1)]
    bad_ratio: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

const GENRES: [&str; 8] = [
    "Fiction",
    "Mystery",
    "Poetry",
    "Historical Fiction",
    "Science Fiction",
    "Travel",
    "Romance",
    "Nonfiction",
];

const TITLE_WORDS: [&str; 12] = [
    "Light", "Attic", "Velvet", "Objects", "Shadow", "River", "Garden", "Night", "Secret",
    "Harbor", "Glass", "Winter",
];

const AUTHORS: [&str; 6] = [
    "Shel Silverstein",
    "Sarah Waters",
    "Gillian Flynn",
    "Michel Houellebecq",
    "Mary Roach",
    "Tracy Chevalier",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !(0.0..=1.0).contains(&cli.bad_ratio) {
        eprintln!(
            "Error: --bad-ratio ({}) must be between 0 and 1",
            cli.bad_ratio
        );
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    println!(
        "Generating {} listings ({}% malformed)...",
        cli.count,
        (cli.bad_ratio * 100.0).round()
    );

    let mut malformed = 0;
    let listings: Vec<RawRecord> = (0..cli.count)
        .map(|i| {
            let listing = generate_listing(&mut rng, i);
            if rng.random_bool(cli.bad_ratio) {
                malformed += 1;
                corrupt_listing(&mut rng, listing)
            } else {
                listing
            }
        })
        .collect();

    let json_output = serde_json::to_string_pretty(&listings)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} listings ({} malformed) and saved to '{}'",
        listings.len(),
        malformed,
        cli.output
    );

    Ok(())
}

/// Generates a well-formed listing shaped like the scraper output.
fn generate_listing<R: Rng>(rng: &mut R, index: usize) -> RawRecord {
    let title = format!(
        "The {} {}",
        TITLE_WORDS.choose(rng).copied().unwrap_or("Untitled"),
        TITLE_WORDS.choose(rng).copied().unwrap_or("Book")
    );
    let rating = Rating::ALL.choose(rng).copied().unwrap_or(Rating::Three);
    let stock = rng.random_range(0..=22u32);

    let mut listing = RawRecord::new()
        .with("title", title)
        .with("author", AUTHORS.choose(rng).copied().unwrap_or("Unknown"))
        .with("genre", GENRES.choose(rng).copied().unwrap_or("Fiction"))
        .with("price", format!("£{:.2}", rng.random_range(10.0..60.0)))
        .with("rating", rating.as_str())
        .with("availability", format!("In stock ({} available)", stock))
        .with("publication_year", rng.random_range(1990..=2024).to_string())
        .with("ranking", index + 1);

    // Roughly half the listings carry a scraped popularity, the rest get one derived.
    if rng.random_bool(0.5) {
        let popularity = u32::from(rating.numeric()) * 10 + (20 - stock.min(20));
        listing.insert("popularity", popularity);
    }
    listing
}

/// Breaks one field of a listing in a way the normalizer must reject or repair.
fn corrupt_listing<R: Rng>(rng: &mut R, mut listing: RawRecord) -> RawRecord {
    match rng.random_range(0..5) {
        0 => listing.insert("price", "£N/A"),
        1 => listing.insert("rating", "Zero"),
        2 => listing.insert("price", serde_json::Value::Null),
        3 => listing.insert("genre", ""),
        _ => listing.insert("title", ""),
    }
    listing
}
