//! Command line front end for the pwmangle rule interpreter.

mod commands;
mod telemetry;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pwmangle_core::CliConfig;
use pwmangle_guess::MutationDriver;
use pwmangle_rules::{load_ruleset, RuleSet};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "pwmangle", version)]
#[command(about = "Apply password mutation rules to seed words")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply every rule to each word and print the distinct results
    Apply {
        /// Rule file (defaults to the configured one)
        #[arg(short, long)]
        rules: Option<PathBuf>,
        /// Words to mutate
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Generate a bounded, deduplicated candidate list from seed words
    Guess {
        #[arg(short, long)]
        rules: Option<PathBuf>,
        /// File with one seed word per line
        #[arg(long)]
        seeds: Option<PathBuf>,
        #[arg(long)]
        max_guesses: Option<usize>,
        #[arg(long)]
        min_len: Option<usize>,
        #[arg(long)]
        max_len: Option<usize>,
        /// Seed words
        words: Vec<String>,
    },
    /// Report rule statistics and instructions that will never apply
    Check {
        #[arg(short, long)]
        rules: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CliConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CliConfig::default(),
    };

    telemetry::init_telemetry(cli.json_logs || config.json_logs)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Apply { rules, words } => {
            let rules = load(rules.as_deref(), &config)?;
            commands::run_apply(&rules, &words, &mut out)?;
        }
        Commands::Guess {
            rules,
            seeds,
            max_guesses,
            min_len,
            max_len,
            mut words,
        } => {
            let rules = load(rules.as_deref(), &config)?;
            if let Some(path) = seeds {
                words.extend(commands::read_seed_file(&path)?);
            }
            if words.is_empty() {
                bail!("no seed words given");
            }

            let guess = commands::merge_guess(&config.guess, max_guesses, min_len, max_len);
            let driver = MutationDriver::new(Arc::new(rules), guess)?;
            let count = commands::run_guess(&driver, words, &mut out)?;
            info!("Wrote {} candidates", count);
        }
        Commands::Check { rules, json } => {
            let rules = load(rules.as_deref(), &config)?;
            commands::run_check(&rules, json, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load(path: Option<&Path>, config: &CliConfig) -> Result<RuleSet> {
    let path = path.unwrap_or(config.rule_file.as_path());
    let rules = load_ruleset(path)?;
    if rules.is_empty() {
        tracing::warn!("Rule file {} contains no rules", path.display());
    }
    Ok(rules)
}
