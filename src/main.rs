//! Voter Roll Search - command-line entry point
//!
//! Loads a voter snapshot, then prints corpus stats, answers a one-shot query,
//! or reads queries from stdin through the input debouncer.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use voter_roll_search::highlight::highlight_field;
use voter_roll_search::{
    AsyncSnapshotClient, Config, Debouncer, LoadState, Markup, MatchResult, SearchField,
    SearchSession, SnapshotClient, SnapshotSource,
};

#[derive(Parser)]
#[command(name = "voter-search")]
#[command(about = "Find a voter by approximate name or partial voter ID")]
struct Cli {
    /// Search query; omit to read queries from stdin
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Snapshot URL or path (overrides VOTER_SNAPSHOT)
    #[arg(short, long)]
    snapshot: Option<String>,

    /// Maximum number of results (overrides MAX_RESULTS)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print corpus statistics
    #[arg(long)]
    stats: bool,
}

/// How results are printed.
#[derive(Clone, Copy)]
struct OutputMode {
    json: bool,
    limit: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    // Logging goes to stderr so stdout stays clean for results
    let level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let snapshot = cli.snapshot.clone().unwrap_or_else(|| config.snapshot.clone());
    let mode = OutputMode {
        json: cli.json,
        limit: cli.limit.unwrap_or(config.max_results),
    };

    let session = Arc::new(SearchSession::new(config.match_options()));
    let client = SnapshotClient::new(
        SnapshotSource::parse(&snapshot),
        Duration::from_secs(config.request_timeout),
    );

    info!("Loading voter snapshot from {}", snapshot);
    match session.load(&AsyncSnapshotClient::new(client)).await {
        LoadState::Ready { records } => info!("Loaded {} voters", records),
        LoadState::Empty => eprintln!("No voter records found in {}", snapshot),
        LoadState::Failed { reason } => eprintln!("Could not load voter data: {}", reason),
        LoadState::NotLoaded => {}
    }

    if cli.stats {
        print_stats(&session, cli.json)?;
    }

    if !cli.query.is_empty() {
        let query = cli.query.join(" ");
        print_results(&session.search(&query, mode.limit), &query, mode)?;
    } else if !cli.stats {
        run_interactive(session, config.debounce(), mode).await?;
    }

    Ok(())
}

/// Read queries line by line; each line supersedes the previous pending one.
async fn run_interactive(session: Arc<SearchSession>, quiet: Duration, mode: OutputMode) -> Result<()> {
    let debouncer = Debouncer::new(quiet);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let session = session.clone();
        debouncer.call(move || {
            let results = session.search(&line, mode.limit);
            if let Err(e) = print_results(&results, &line, mode) {
                error!("Failed to print results: {}", e);
            }
        });
    }

    // Let the last query run before exiting
    tokio::time::sleep(debouncer.quiet_period()).await;
    while debouncer.is_pending() {
        tokio::task::yield_now().await;
    }

    let summary = session.metrics().summary();
    info!(
        searches = summary.searches_total,
        avg_us = summary.search_duration_avg_us,
        "Session finished"
    );
    Ok(())
}

fn print_stats(session: &SearchSession, json: bool) -> Result<()> {
    let stats = session.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let metadata = session.metadata();
    println!("{}", stats);
    if !metadata.pdfs_processed.is_empty() {
        println!("Source documents: {}", metadata.pdfs_processed.len());
    }
    if let Some(extracted) = metadata.extracted_at() {
        println!("Extracted at: {}", extracted);
    }
    Ok(())
}

fn print_results(results: &[MatchResult], query: &str, mode: OutputMode) -> Result<()> {
    if mode.json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No matches for \"{}\"", query.trim());
        return Ok(());
    }

    let markup = Markup::new("[", "]");
    for (rank, result) in results.iter().enumerate() {
        let record = &result.record;
        let name_field = if record.name_latin.is_empty() {
            SearchField::NameLocal
        } else {
            SearchField::NameLatin
        };
        println!(
            "{:>3}. {:<12} {}  (score {:.4})",
            rank + 1,
            highlight_field(result, SearchField::VoterId, query, &markup),
            highlight_field(result, name_field, query, &markup),
            result.score
        );

        let relative_field = if record.relative_name_latin.is_empty() {
            SearchField::RelativeNameLocal
        } else {
            SearchField::RelativeNameLatin
        };
        let relative = relative_field.value(record);
        if !relative.is_empty() {
            let label = if record.relation_label.is_empty() {
                "Relative"
            } else {
                record.relation_label.as_str()
            };
            println!("     {}: {}", label, highlight_field(result, relative_field, query, &markup));
        }

        let mut details = Vec::new();
        if !record.house_number.is_empty() {
            details.push(format!("House {}", record.house_number));
        }
        if let Some(age) = record.age {
            details.push(format!("Age {}", age));
        }
        details.push(record.gender.to_string());
        println!("     {}", details.join(" | "));
    }
    Ok(())
}

