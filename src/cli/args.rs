//! CLI argument definitions using clap
//!
//! Commands:
//! - docpager serve --config <path>
//! - docpager query --config <path> --collection <name> [--query <qs>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docpager - paginated listings over a document store
#[derive(Parser, Debug)]
#[command(name = "docpager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed the store and serve list endpoints until Ctrl-C
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./docpager.json")]
        config: PathBuf,
    },

    /// Run a single list query and print the envelope
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./docpager.json")]
        config: PathBuf,

        /// Route name of the collection, e.g. `products`
        #[arg(long)]
        collection: String,

        /// Raw query string, e.g. `cost[gt]=100&sort=-cost&page=2`
        #[arg(long, default_value = "")]
        query: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
