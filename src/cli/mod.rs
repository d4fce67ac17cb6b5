//! Command-line interface for parspeed
//!
//! Every benchmark command prints the sequential time, the parallel time and the speedup.
//! Workload constants come from the configuration and can be overridden per command.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

use crate::config::ParspeedConfig;
use crate::report::{self, ReportFormat};

/// parspeed - sequential vs parallel workload benchmarks
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path (TOML or JSON)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: ReportFormat,

    /// Maximum worker threads for the shared pool (0 = all allowed cores)
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Factorials of a set of integers (one task per input)
    Factorial(commands::factorial::FactorialArgs),
    /// Grayscale conversion of an image (one task per row)
    Grayscale(commands::grayscale::GrayscaleArgs),
    /// Square matrix multiplication (one task per output cell)
    Matrix(commands::matrix::MatrixArgs),
    /// Nilakantha series for π (fixed number of contiguous blocks)
    Pi(commands::pi::PiArgs),
    /// Sort JSON records by name (one task per record, or a bounded pool)
    Records(commands::records::RecordsArgs),
    /// Aggregate record counts from HTTP endpoints (one task per endpoint)
    Fetch(commands::fetch::FetchArgs),
    /// Run every self-contained CPU workload (factorial, matrix, pi)
    All,
    /// Show the merged configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let mut config = ParspeedConfig::load_with_custom_config(self.config.as_deref())?;
        if let Some(threads) = self.threads {
            config.runtime.max_threads = threads;
        }

        // JSON goes to stdout alone; styled chatter would corrupt it
        let output = Output::new(
            self.verbose > 0,
            self.quiet || self.format == ReportFormat::Json,
        );

        let comparisons = match self.command {
            Some(Commands::Factorial(args)) => {
                vec![commands::factorial::execute(args, &config, &output)?]
            }
            Some(Commands::Grayscale(args)) => {
                vec![commands::grayscale::execute(args, &config, &output)?]
            }
            Some(Commands::Matrix(args)) => {
                vec![commands::matrix::execute(args, &config, &output)?]
            }
            Some(Commands::Pi(args)) => vec![commands::pi::execute(args, &config, &output)?],
            Some(Commands::Records(args)) => {
                vec![commands::records::execute(args, &config, &output)?]
            }
            Some(Commands::Fetch(args)) => {
                vec![commands::fetch::execute(args, &config, &output).await?]
            }
            Some(Commands::All) => commands::all::execute(&config, &output)?,
            Some(Commands::Config) => {
                print!("{}", config.to_toml()?);
                return Ok(());
            }
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                return Ok(());
            }
        };

        report::render(&comparisons, self.format, &output)
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,reqwest=warn,hyper=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,reqwest=info,hyper=info"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so --format json stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
