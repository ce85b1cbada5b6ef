#![forbid(unsafe_code)]
//! Stratnav Command Line Interface

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use stratnav::commands::{
    execute_check, execute_imperatives, execute_init, execute_options, execute_recommend,
    execute_run, ImperativesOptions, InitOptions, OptionsOptions, RecommendOptions,
};
use stratnav::config::DEFAULT_CONFIG_FILE;
use stratnav::Config;

#[derive(Parser)]
#[command(name = "stratnav")]
#[command(about = "Guided strategic-imperative selection with generated recommendations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Workbook path (overrides the config file)
    #[arg(short, long, global = true, env = "STRATNAV_WORKBOOK")]
    workbook: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the workbook against the configured layout
    Check,

    /// List role, lifecycle, journey, and differentiator options
    Options {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List strategic imperatives eligible for a criteria triple
    Imperatives {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate recommendations without prompting
    Recommend {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Strategic imperative to include (repeat up to 3 times)
        #[arg(short, long = "imperative", required = true)]
        imperatives: Vec<String>,

        /// Product differentiator to include (repeat up to 3 times)
        #[arg(short, long = "differentiator")]
        differentiators: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive guided selection (default)
    Run,
}

#[derive(clap::Args)]
struct CriteriaArgs {
    /// Role option (criteria header label)
    #[arg(long)]
    role: String,

    /// Product lifecycle stage option
    #[arg(long)]
    lifecycle: String,

    /// Customer journey focus option
    #[arg(long)]
    journey: String,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "stratnav=debug" } else { "stratnav=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the config file (built-in defaults when absent) and apply overrides
fn load_config(path: &Path, workbook: Option<PathBuf>) -> Config {
    let mut config = if path.exists() {
        match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "{} Invalid config {}: {}",
                    style("✗").red(),
                    path.display(),
                    e
                );
                eprintln!("  Run 'stratnav init --force' to write a fresh one");
                std::process::exit(1);
            }
        }
    } else {
        tracing::debug!("{} not found, using defaults", path.display());
        Config::default()
    };
    if let Some(workbook) = workbook {
        config.workbook.path = workbook;
    }
    config
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Commands::Run) {
        // Init runs before any config exists.
        Commands::Init { force } => {
            execute_init(InitOptions {
                path: cli.config,
                force,
                workbook: cli.workbook,
            })?;
        }

        Commands::Check => execute_check(&load_config(&cli.config, cli.workbook))?,

        Commands::Options { json } => {
            let config = load_config(&cli.config, cli.workbook);
            execute_options(OptionsOptions { json }, &config)?;
        }

        Commands::Imperatives { criteria, json } => {
            let config = load_config(&cli.config, cli.workbook);
            let options = ImperativesOptions {
                role: criteria.role,
                lifecycle: criteria.lifecycle,
                journey: criteria.journey,
                json,
            };
            execute_imperatives(options, &config)?;
        }

        Commands::Recommend {
            criteria,
            imperatives,
            differentiators,
            json,
        } => {
            let config = load_config(&cli.config, cli.workbook);
            let options = RecommendOptions {
                role: criteria.role,
                lifecycle: criteria.lifecycle,
                journey: criteria.journey,
                imperatives,
                differentiators,
                json,
            };
            execute_recommend(options, &config)?;
        }

        Commands::Run => execute_run(&load_config(&cli.config, cli.workbook))?,
    }

    Ok(())
}
