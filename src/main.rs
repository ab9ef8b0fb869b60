//! Caseharvest main entry point
//!
//! Command-line interface for harvesting competitive-programming test cases
//! from a shared cloud folder tree.

use caseharvest::config::{load_config_with_hash, Config};
use caseharvest::crawler::{harvest, TestCaseCrawler};
use caseharvest::metadata::ProblemsClient;
use caseharvest::output;
use caseharvest::remote::SharedFolderClient;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Caseharvest: a contest test-case harvester
///
/// Walks a shared folder tree of contest test data, pairs input/output
/// files into test-case records, and writes them as per-problem JSON files.
#[derive(Parser, Debug)]
#[command(name = "caseharvest")]
#[command(version = "1.0.0")]
#[command(about = "A contest test-case harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Maximum number of contest folders to process (overrides config; 0 = all)
    #[arg(long)]
    limit: Option<usize>,

    /// Additional contest folder name to skip (repeatable)
    #[arg(long, value_name = "NAME")]
    skip: Vec<String>,

    /// Re-crawl a single contest folder and exit
    #[arg(long, value_name = "NAME", conflicts_with_all = ["resume", "metadata_only"])]
    contest: Option<String>,

    /// Skip contests already recorded in the output manifest
    #[arg(long)]
    resume: bool,

    /// Only fetch and write the problem metadata listing
    #[arg(long)]
    metadata_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Apply command-line overrides
    if let Some(limit) = cli.limit {
        config.harvest.limit = limit;
    }
    config.harvest.skip.extend(cli.skip.iter().cloned());

    // Handle different modes
    if cli.metadata_only {
        handle_metadata(&config).await
    } else if let Some(contest) = &cli.contest {
        handle_contest(&config, contest).await
    } else {
        handle_harvest(config, cli.resume).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("caseharvest=info,warn"),
            1 => EnvFilter::new("caseharvest=debug,info"),
            2 => EnvFilter::new("caseharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --metadata-only mode: fetches and writes problems.json
async fn handle_metadata(config: &Config) -> anyhow::Result<()> {
    let client = ProblemsClient::new(config.metadata.problems_url.clone());
    let problems = client.fetch_problems().await?;

    output::write_problems(Path::new(&config.output.directory), &problems)?;
    Ok(())
}

/// Handles the --contest mode: scoped re-crawl of one contest folder
async fn handle_contest(config: &Config, contest_folder_name: &str) -> anyhow::Result<()> {
    let client = SharedFolderClient::from_config(&config.storage);
    let crawler = TestCaseCrawler::new(client.clone(), client);

    let test_cases = crawler.crawl_contest(contest_folder_name).await?;
    tracing::info!(
        "Fetched {} test cases from '{}'",
        test_cases.len(),
        contest_folder_name
    );

    output::write_test_cases(Path::new(&config.output.directory), &test_cases)?;
    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(mut config: Config, resume: bool) -> anyhow::Result<()> {
    let out_dir = PathBuf::from(&config.output.directory);

    let mut prior_contests = Vec::new();
    if resume {
        match output::read_manifest(&out_dir)? {
            Some(manifest) => {
                tracing::info!(
                    "Resuming: {} contests already captured at {}",
                    manifest.contests.len(),
                    manifest.generated_at
                );
                prior_contests = manifest.contests.clone();
                config.harvest.skip.extend(manifest.contests);
            }
            None => {
                tracing::info!(
                    "No manifest found in {}, starting from scratch",
                    out_dir.display()
                );
            }
        }
    }

    let test_cases = harvest(&config).await?;
    tracing::info!("Harvest finished with {} test cases", test_cases.len());

    output::write_test_cases(&out_dir, &test_cases)?;

    let manifest = output::CrawlManifest::new(&test_cases, &prior_contests);
    output::write_manifest(&out_dir, &manifest)?;

    Ok(())
}
