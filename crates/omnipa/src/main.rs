// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OmniPA - intent-based model routing.
//!
//! This is the binary entry point: a thin caller around the model selector.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod inspect;
mod route;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

/// OmniPA - pick the right model for every chat turn.
#[derive(Parser, Debug)]
#[command(name = "omnipa", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this TOML file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Route a chat request (JSON) and print the model selection.
    Route {
        /// Read the request from this file instead of stdin.
        #[arg(long, short, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Answer invalid requests with the caller default instead of failing.
        #[arg(long)]
        lenient: bool,
    },
    /// Print the intent assigned to a piece of text.
    Classify {
        /// Message text to classify.
        text: String,
    },
    /// Show the keyword table in scan order.
    Keywords {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => omnipa_config::load_and_validate_path(path),
        None => omnipa_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            omnipa_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Some(Commands::Route { input, lenient }) => {
            route::run_route(&config, input.as_deref(), lenient, &mut stdout)
        }
        Some(Commands::Classify { text }) => inspect::run_classify(&config, &text, &mut stdout),
        Some(Commands::Keywords { plain }) => inspect::run_keywords(&config, plain, &mut stdout),
        Some(Commands::Config) => inspect::run_config(&config, &mut stdout),
        None => {
            println!("omnipa: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        eprintln!("omnipa: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout stays
/// machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("omnipa={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
