//! sonnet-rhymes - rhyme scheme analysis for sonnets
//!
//! Fetches sonnets, checks each expected rhyme pair against a persistent
//! rhyme cache backed by the Datamuse API, and reports the distribution of
//! rhymes found and mean rhyme scores.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sonnet_common::config::{resolve_root_folder, BootstrapConfig, ROOT_FOLDER_ENV};
use sonnet_rhymes::provider::DatamuseClient;
use sonnet_rhymes::report::{AnalysisReport, CliFormatter};
use sonnet_rhymes::source::{GutenbergSource, HtmlFileSource, PoemSource};
use sonnet_rhymes::{RhymeCache, RhymeError, RhymeStore, SonnetScorer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for sonnet-rhymes
#[derive(Parser, Debug)]
#[command(name = "sonnet-rhymes")]
#[command(about = "Score sonnets against the ABAB CDCD EFEF GG rhyme pattern")]
#[command(version)]
struct Args {
    /// Root folder holding the rhyme database
    #[arg(short, long, env = ROOT_FOLDER_ENV)]
    root_folder: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "SONNET_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a batch of sonnets and print the report
    Analyze {
        /// Number of poems to take from the start of the document
        #[arg(short, long, default_value = "60")]
        limit: usize,

        /// Read poems from a local HTML file instead of the configured URL
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory to write the JSON report into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the cached rhymes of one word, querying the provider on a miss
    Lookup {
        word: String,
    },

    /// Create the rhyme database schema and exit
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config supplies the default log level
    let config_path = BootstrapConfig::locate(args.config.as_deref());
    let config = match &config_path {
        Some(path) => BootstrapConfig::from_file(path),
        None => Ok(BootstrapConfig::default()),
    }
    .context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sonnet-rhymes {}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No config file found, using built-in defaults"),
    }

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), ROOT_FOLDER_ENV, &config);
    let db_path = config.database_path(&root_folder);
    info!("Database: {}", db_path.display());

    let store = RhymeStore::open(&db_path, &config.database)
        .await
        .context("Failed to open rhyme database")?;

    match args.command {
        Command::InitDb => {
            info!("Rhyme database ready");
            Ok(())
        }
        Command::Lookup { word } => lookup(store, &config, &word).await,
        Command::Analyze {
            limit,
            input,
            output_dir,
        } => {
            let source: Box<dyn PoemSource> = match input {
                Some(path) => Box::new(HtmlFileSource::new(path, config.source.poem_selector.clone())),
                None => Box::new(
                    GutenbergSource::new(&config.source, &config.provider)
                        .context("Failed to create poem source")?,
                ),
            };
            analyze(store, &config, source.as_ref(), limit, output_dir).await
        }
    }
}

async fn lookup(store: RhymeStore, config: &BootstrapConfig, word: &str) -> Result<()> {
    let provider = DatamuseClient::new(&config.provider).context("Failed to create Datamuse client")?;
    let cache = RhymeCache::new(store, provider);

    let word = word.trim().to_lowercase();
    let rhymes = cache
        .find_rhyming_words(&word)
        .await
        .with_context(|| format!("Rhyme lookup failed for {:?}", word))?;

    println!("{} rhymes for {:?}", rhymes.len(), word);
    for fact in rhymes {
        println!("  {:<24} score {:>8.1}  syllables {}", fact.word2, fact.score, fact.num_syllables);
    }

    Ok(())
}

async fn analyze(
    store: RhymeStore,
    config: &BootstrapConfig,
    source: &dyn PoemSource,
    limit: usize,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let poems = source.fetch_poems().await.context("Failed to fetch poems")?;
    info!(available = poems.len(), limit, "Poems fetched");

    let provider = DatamuseClient::new(&config.provider).context("Failed to create Datamuse client")?;
    let cache = RhymeCache::new(store, provider);
    let scorer = SonnetScorer::new(&cache);
    let mut report = AnalysisReport::new();

    for (index, poem) in poems.iter().enumerate().take(limit) {
        match scorer.analyze(poem).await {
            Ok(analysis) => {
                info!(
                    index,
                    rhymes_found = analysis.stats.num_rhymes_found,
                    average_score = ?analysis.stats.average_rhyme_score,
                    "Scored sonnet"
                );
                report.record_scored(index, analysis);
            }
            Err(RhymeError::ContractViolation(reason)) => {
                warn!(index, reason = %reason, "Skipping poem");
                report.record_skipped(index, reason);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Scoring poem {} failed", index));
            }
        }
    }

    println!("{}", CliFormatter::format_summary(&report));

    if let Some(dir) = output_dir {
        let path = report
            .export_json_to_dir(&dir)
            .with_context(|| format!("Failed to write report to {}", dir.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
