// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TaxNova - Pakistan income tax assistant.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod app;
mod ask;
mod calc;
mod interaction_log;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use taxnova_config::{ConfigError, TaxnovaConfig};
use tracing_subscriber::EnvFilter;

/// TaxNova - answers Pakistan income tax questions.
#[derive(Parser, Debug)]
#[command(name = "taxnova", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer one question and exit.
    Ask {
        /// The question, e.g. "tax on 1,200,000 salary".
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Also print where the answer came from and how long it took.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Launch an interactive REPL session.
    Shell,
    /// Calculate income tax for an annual income in rupees.
    Calc {
        #[arg(allow_negative_numbers = true)]
        income: f64,
    },
    /// Print the income tax slab table.
    Slabs,
}

fn load_config(path: Option<&PathBuf>) -> Result<TaxnovaConfig, Vec<ConfigError>> {
    match path {
        Some(path) => taxnova_config::load_and_validate_path(path),
        None => taxnova_config::load_and_validate(),
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over `log_level`.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taxnova={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            taxnova_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let result = match cli.command {
        Some(Commands::Ask { query, verbose }) => {
            ask::run_ask(&config, &query.join(" "), verbose).await
        }
        Some(Commands::Shell) => shell::run_shell(config).await,
        Some(Commands::Calc { income }) => {
            calc::calc_report(&config, income).map(|report| println!("{report}"))
        }
        Some(Commands::Slabs) => calc::slabs_report(&config).map(|report| println!("{report}")),
        None => {
            println!("taxnova: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
