use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use quotebook_core::commands;
use quotebook_core::config::Config;
use quotebook_core::services::{catalog, expand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds, expands and pre-translates the quote catalog")]
struct Cli {
    /// Log level, used when RUST_LOG is not set
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Build the catalog from the flat seed, padding by repetition
    Generate {
        #[arg(long, default_value_t = catalog::DEFAULT_TARGET)]
        target: usize,

        /// Seed file to use instead of the bundled one
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Build the catalog from the per-category seed, padding round-robin
    GenerateCommercial {
        #[arg(long, default_value_t = catalog::DEFAULT_TARGET)]
        target: usize,

        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Ask the completion API for more quotes in every category
    Expand {
        #[arg(long, default_value_t = expand::DEFAULT_PER_CATEGORY)]
        per_category: usize,
    },

    /// Translate every quote into the target languages
    Translate,

    /// Print catalog statistics and consistency issues
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let cfg = Config::from_env();

    match cli.command {
        Command::Generate { target, seed } => {
            commands::generate(&cfg, target, seed.as_deref())?;
        }
        Command::GenerateCommercial { target, seed } => {
            commands::generate_commercial(&cfg, target, seed.as_deref())?;
        }
        Command::Expand { per_category } => {
            if let Some(report) = commands::expand(&cfg, per_category)? {
                info!(
                    existing = report.existing,
                    added = report.added,
                    failed = report.failed_categories.len(),
                    "expand done"
                );
            }
        }
        Command::Translate => {
            if let Some(report) = commands::translate(&cfg)? {
                info!(
                    succeeded = report.succeeded,
                    failed = report.failed,
                    skipped = report.skipped,
                    "translate done"
                );
            }
        }
        Command::Check => {
            let (stats, issues) = commands::check(&cfg)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            for issue in &issues {
                warn!(id = issue.id, code = %issue.code, "{}", issue.message);
            }
            info!(issues = issues.len(), "check done");
        }
    }

    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow::anyhow!("Invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    Ok(())
}
