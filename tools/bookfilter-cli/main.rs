use bookfilter::analysis::{PriceBands, genre_summaries, top_by_popularity};
use bookfilter::normalizer::DEFAULT_CURRENCY_SYMBOLS;
use bookfilter::prelude::*;
use bookfilter::source;
use clap::{ArgAction, Parser};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Filter, sort and sample scraped book listings
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the scraped data file (.json or .csv)
    data_path: Option<PathBuf>,

    /// Only show books of this genre ("All" for every genre)
    #[arg(short, long)]
    genre: Option<String>,

    /// Minimum price (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    min_price: Option<f64>,

    /// Maximum price (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    max_price: Option<f64>,

    /// Minimum star rating, 1 to 5
    #[arg(long, allow_negative_numbers = true)]
    min_rating: Option<i64>,

    /// Sort descending by price, rating_numeric or popularity
    #[arg(short, long)]
    sort: Option<String>,

    /// Suggest one random book from the selected genre instead of listing
    #[arg(long)]
    random: bool,

    /// List the available genres
    #[arg(long)]
    genres: bool,

    /// Print per-genre statistics, price bands and the most popular titles
    #[arg(long)]
    summary: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Drop listings with the same title and author as an earlier one
    #[arg(long)]
    dedupe: bool,

    /// Extra currency symbol to strip from prices (repeatable)
    #[arg(long = "currency")]
    currency: Vec<String>,

    /// Run in interactive mode to be prompted for filters
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// A record as printed with `--json`, including the derived numeric rating.
#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    record: &'a BookRecord,
    rating_numeric: u8,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref()) {
        exit_with_error(&format!("Failed to set up logging: {}", e));
    }

    let normalizer = build_normalizer(&cli);

    if cli.human {
        run_interactive(cli.data_path, &normalizer);
    } else {
        run_non_interactive(cli, &normalizer);
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> io::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .init();
    Ok(())
}

fn build_normalizer(cli: &Cli) -> Normalizer {
    cli.currency
        .iter()
        .fold(Normalizer::builder(), |builder, symbol| {
            builder.with_currency_symbol(symbol)
        })
        .dedupe(cli.dedupe)
        .build()
}

/// Loads and normalizes the data file, returning the records and the reject count.
fn load_records(path: &Path, normalizer: &Normalizer) -> Result<(Vec<BookRecord>, usize)> {
    let raw = source::load(path)?;
    let report = normalizer.normalize_with_report(raw);
    for rejection in &report.rejected {
        tracing::warn!(
            row = rejection.index,
            reason = %rejection.reason,
            "Skipped listing"
        );
    }
    Ok((report.records, report.rejected.len()))
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli, normalizer: &Normalizer) {
    let data_path = cli.data_path.clone().unwrap_or_else(|| {
        exit_with_error("Data path is required in non-interactive mode.");
    });

    let (records, _) = load_records(&data_path, normalizer).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load data from '{}': {}",
            data_path.display(),
            e
        ))
    });
    let engine = QueryEngine::with_records(records);
    let currency = currency_label(normalizer);

    if cli.genres {
        print_genres(&engine);
        return;
    }

    if cli.summary {
        print_summary(&engine, currency);
        return;
    }

    let genre = GenreFilter::from(cli.genre.as_deref().unwrap_or(ALL_GENRES));

    if cli.random {
        let book = engine
            .random_pick(genre)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        if cli.json {
            print_json(std::slice::from_ref(&book));
        } else {
            println!("Random Book Suggestion:\n");
            print!("{}", format_record(&book, currency));
        }
        return;
    }

    let filter = FilterSpec {
        genre,
        min_price: cli.min_price,
        max_price: cli.max_price,
        min_rating: cli.min_rating,
    };
    let results = parse_sort(cli.sort.as_deref())
        .and_then(|sort| engine.query(&filter, sort))
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    if cli.json {
        print_json(&results);
    } else {
        print!("{}", format_results(&results, currency));
    }
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(data_path: Option<PathBuf>, normalizer: &Normalizer) {
    println!("--- Book Filter Interactive Mode ---");

    let data_path = data_path.unwrap_or_else(|| {
        PathBuf::from(prompt_or_exit("Enter data file path", Some("scraped_books.csv")))
    });
    let currency = currency_label(normalizer);

    let mut engine = QueryEngine::new();
    match load_records(&data_path, normalizer) {
        Ok((records, rejected)) => {
            println!("Loaded {} books ({} skipped).", records.len(), rejected);
            engine.replace(records);
        }
        Err(e) => exit_with_error(&format!(
            "Failed to load data from '{}': {}",
            data_path.display(),
            e
        )),
    }

    loop {
        println!("\nCommands: filter, random, genres, summary, reload, quit");
        let command = prompt_or_exit("Enter command", Some("filter"));

        match command.as_str() {
            "filter" | "f" => match prompt_filter() {
                Ok((filter, sort)) => match engine.query(&filter, sort) {
                    Ok(results) => print!("{}", format_results(&results, currency)),
                    Err(e) => println!("Error: {}", e),
                },
                Err(message) => println!("Error: {}", message),
            },
            "random" | "r" => {
                let genre = prompt_or_exit("Genre", Some(ALL_GENRES));
                match engine.random_pick(genre) {
                    Ok(book) => {
                        println!("Random Book Suggestion:\n");
                        print!("{}", format_record(&book, currency));
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "genres" | "g" => print_genres(&engine),
            "summary" | "s" => print_summary(&engine, currency),
            "reload" => match load_records(&data_path, normalizer) {
                Ok((records, rejected)) => {
                    engine.replace(records);
                    println!("Data refreshed: {} books ({} skipped).", engine.len(), rejected);
                }
                Err(e) => println!("Failed to refresh data: {}", e),
            },
            "quit" | "q" | "exit" => break,
            other => println!("Unknown command '{}'.", other),
        }
    }
}

/// Prompts for every filter option. Blank answers leave the option unset.
fn prompt_filter() -> std::result::Result<(FilterSpec, Option<SortKey>), String> {
    let genre = prompt_or_exit("Genre", Some(ALL_GENRES));
    let min_price = parse_optional::<f64>(&prompt_or_exit("Minimum price", None), "minimum price")?;
    let max_price = parse_optional::<f64>(&prompt_or_exit("Maximum price", None), "maximum price")?;
    let min_rating =
        parse_optional::<i64>(&prompt_or_exit("Minimum rating (1-5)", None), "rating")?;
    let sort_name = prompt_or_exit("Sort by (price, rating_numeric, popularity)", None);
    let sort = parse_sort(Some(sort_name.as_str())).map_err(|e| e.to_string())?;

    let filter = FilterSpec {
        genre: GenreFilter::from(genre),
        min_price,
        max_price,
        min_rating,
    };
    Ok((filter, sort))
}

fn parse_optional<T: std::str::FromStr>(
    input: &str,
    what: &str,
) -> std::result::Result<Option<T>, String> {
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| format!("Invalid {}: '{}' is not a number.", what, input))
}

fn parse_sort(name: Option<&str>) -> std::result::Result<Option<SortKey>, QueryError> {
    match name {
        None | Some("") => Ok(None),
        Some(name) => name.parse().map(Some),
    }
}

fn print_genres(engine: &QueryEngine) {
    match engine.available_genres() {
        Ok(genres) => {
            for genre in genres {
                println!("{}", genre);
            }
        }
        Err(e) => println!("{}", e),
    }
}

fn print_summary(engine: &QueryEngine, currency: &str) {
    let snapshot = match engine.snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    let records = snapshot.records();

    println!("\n--- Books per Genre ---");
    for summary in genre_summaries(records) {
        println!(
            "{:<28} {:>4} books  avg {}{:.2} (min {}{:.2}, max {}{:.2})  rating {:.2}  popularity {:.1}",
            summary.genre,
            summary.count,
            currency,
            summary.mean_price,
            currency,
            summary.min_price,
            currency,
            summary.max_price,
            summary.mean_rating,
            summary.mean_popularity,
        );
    }

    if let Some(bands) = PriceBands::from_records(records) {
        println!("\n--- Price Bands ---");
        println!("Low:    up to {}{:.2}", currency, bands.low_max);
        println!("Medium: up to {}{:.2}", currency, bands.medium_max);
        println!("High:   above {}{:.2}", currency, bands.medium_max);
    }

    println!("\n--- Top 5 Most Popular Books ---");
    for book in top_by_popularity(records, 5) {
        println!(
            "{:>6.1}  {} by {} ({})",
            book.popularity, book.title, book.author, book.rating
        );
    }
    println!();
}

fn print_json(records: &[BookRecord]) {
    let rows: Vec<JsonRow<'_>> = records
        .iter()
        .map(|record| JsonRow {
            record,
            rating_numeric: record.rating_numeric(),
        })
        .collect();
    match serde_json::to_string_pretty(&rows) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize results: {}", e)),
    }
}

fn format_results(records: &[BookRecord], currency: &str) -> String {
    if records.is_empty() {
        return "No books found matching the filters.\n".to_string();
    }
    let mut out = format!("Found {} books matching the criteria:\n\n", records.len());
    for record in records {
        out.push_str(&format_record(record, currency));
        out.push('\n');
    }
    out
}

fn format_record(record: &BookRecord, currency: &str) -> String {
    format!(
        "Title: {}\nAuthor: {}\nGenre: {}\nPrice: {}{:.2}\nRating: {}\nPopularity: {:.1}\n{}\n",
        record.title,
        record.author,
        record.genre,
        currency,
        record.price,
        record.rating,
        record.popularity,
        "-".repeat(50),
    )
}

/// The symbol printed in front of prices. Prices are shown bare once the symbol
/// set differs from the default, since the stripped prefix is not kept per record.
fn currency_label(normalizer: &Normalizer) -> &str {
    let symbols = normalizer.currency_symbols();
    if symbols.iter().map(String::as_str).ne(DEFAULT_CURRENCY_SYMBOLS) {
        return "";
    }
    symbols.first().map(String::as_str).unwrap_or("")
}

/// Prompts the user and reads a line of input. Exits cleanly on end of input.
fn prompt_or_exit(prompt_text: &str, default: Option<&str>) -> String {
    let default_prompt = default.map_or(String::new(), |d| format!(" [default: {}]", d));
    print!("> {}{}: ", prompt_text, default_prompt);

    let mut line = String::new();
    let read = io::stdout()
        .flush()
        .and_then(|_| io::stdin().read_line(&mut line));
    match read {
        Ok(0) => std::process::exit(0),
        Ok(_) => {}
        Err(e) => exit_with_error(&format!("Failed to read input: {}", e)),
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed.to_string()
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
