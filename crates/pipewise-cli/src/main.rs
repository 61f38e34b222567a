//! pipewise CLI.
//!
//! Runs the functional-programming demos and evaluates integer pipelines
//! given on the command line.
//!
//! # Quick Start
//!
//! ```bash
//! # Run every demo
//! pipewise demo
//!
//! # Keep odd numbers, multiply by five, sum from 50
//! pipewise eval -s filter:odd -s map:mul:5 -s reduce:sum:50 1 2 3 4 5
//! ```

mod commands;
mod demos;
mod style;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pipewise::ExecMode;
use pipewise_config::{ConfigLoader, PipewiseConfig};
use tracing_subscriber::EnvFilter;

use commands::eval::EvalOptions;

/// pipewise - ordered stream pipelines and functional-programming demos.
#[derive(Parser)]
#[command(name = "pipewise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Run demos by name, or all of them.
    Demo {
        /// Demo names (see `pipewise list`).
        names: Vec<String>,
    },

    /// List available demos.
    List,

    /// Evaluate an integer pipeline.
    Eval {
        /// Stage spec, repeatable and applied in order (map:mul:5, filter:odd, reduce:sum:50, ...).
        #[arg(short, long = "stage", value_name = "SPEC")]
        stages: Vec<String>,

        /// Input integers.
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Print the plan before the result.
        #[arg(long)]
        explain: bool,

        /// Partition seeded reductions regardless of configured mode and threshold.
        #[arg(long)]
        parallel: bool,
    },

    /// Reverse every word of a text.
    Reverse {
        /// Text to reverse.
        text: String,
    },

    /// Show the effective configuration.
    Config,
}

fn init_logging(config: &PipewiseConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()))
    };

    // stdout carries demo output; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!style::no_color())
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let loader = ConfigLoader::new();
    let sources = loader.present_files();
    let config = loader.load().context("Failed to load configuration")?;

    style::set_no_color(cli.no_color || !config.output.color);
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Demo { names } => commands::demo::run(&names, config.exec_mode()),
        Commands::List => {
            commands::list::run();
            Ok(())
        }
        Commands::Eval {
            stages,
            values,
            json,
            explain,
            parallel,
        } => {
            let mode = if parallel {
                ExecMode::Parallel { min_len: 1 }
            } else {
                config.exec_mode()
            };
            let options = EvalOptions {
                json: json || config.output.json,
                explain,
                mode,
            };
            commands::eval::run(&stages, values, &options)
        }
        Commands::Reverse { text } => {
            commands::reverse::run(&text);
            Ok(())
        }
        Commands::Config => commands::config::show(&config, &sources),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            style::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
