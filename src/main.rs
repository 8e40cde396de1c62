//! Simplify crawler main entry point
//!
//! This is the command-line interface for discovering and storing the pages
//! of a customer's website.

use anyhow::Context;
use clap::{Parser, Subcommand};
use simplify_crawler::config::{load_config_with_hash, validate, Config};
use simplify_crawler::crawler::{CrawlRequest, Crawler};
use simplify_crawler::output::{load_statistics, print_json, print_pages, print_statistics};
use simplify_crawler::storage::{self, PageStore, SqliteStorage};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Simplify crawler: page discovery for content accessibility
///
/// Crawls a customer's website breadth-first within a page budget, stays on
/// the homepage's host, and stores the readable content of every page for
/// later simplification.
#[derive(Parser, Debug)]
#[command(name = "simplify-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Website page discovery for content accessibility", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a website breadth-first from its homepage
    Crawl {
        /// Customer the pages belong to
        #[arg(long)]
        customer: String,

        /// Homepage URL
        url: String,

        /// Maximum number of pages to store
        #[arg(long)]
        max_pages: Option<usize>,

        /// Pause between requests in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Fetch and store a single page
    Single {
        /// Customer the page belongs to
        #[arg(long)]
        customer: String,

        /// Page URL
        url: String,
    },

    /// List a customer's stored pages
    Pages {
        /// Customer whose pages are listed
        #[arg(long)]
        customer: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;

    match cli.command {
        Command::Crawl {
            customer,
            url,
            max_pages,
            delay_ms,
        } => {
            if let Some(max_pages) = max_pages {
                config.crawler.max_pages = max_pages;
            }
            if let Some(delay_ms) = delay_ms {
                config.crawler.delay_ms = delay_ms;
            }
            validate(&config).context("invalid command-line overrides")?;

            handle_invoke(&config, CrawlRequest::crawl(customer, url)).await
        }
        Command::Single { customer, url } => {
            handle_invoke(&config, CrawlRequest::single(customer, url)).await
        }
        Command::Pages { customer, json } => {
            handle_pages(&config, &customer, json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the JSON response.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("simplify_crawler=info,warn"),
            1 => EnvFilter::new("simplify_crawler=debug,info"),
            2 => EnvFilter::new("simplify_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the defaults when none is given
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

fn open_storage(config: &Config) -> anyhow::Result<SqliteStorage> {
    let path = Path::new(&config.output.database_path);
    tracing::debug!("Opening page store at {}", path.display());
    storage::open_storage(path).with_context(|| format!("failed to open {}", path.display()))
}

/// Runs a crawl or single-page invocation and prints its JSON response
async fn handle_invoke(config: &Config, request: CrawlRequest) -> anyhow::Result<ExitCode> {
    let storage = Arc::new(Mutex::new(open_storage(config)?));
    let crawler = Crawler::new(config, storage)?;

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            token.cancel();
        }
    });

    let response = crawler.invoke(&request, &cancel).await?;
    print_json(&response)?;

    if response.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Prints a customer's pages and their status summary
fn handle_pages(config: &Config, customer_id: &str, json: bool) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let pages = storage.list_pages(customer_id)?;

    if json {
        print_json(&pages)?;
        return Ok(());
    }

    println!("Database: {}\n", config.output.database_path);
    print_pages(&pages);

    let stats = load_statistics(&storage, customer_id)?;
    print_statistics(&stats);

    Ok(())
}
