//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Compile Logo Objects filter expressions and list query strings.
#[derive(Debug, Parser)]
#[command(name = "lobq", version)]
pub struct Cli {
    /// Column map file (YAML) with `overrides` and an optional `known` list
    #[arg(long, global = true, value_name = "FILE")]
    pub columns: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile search criteria into a filter expression
    ///
    /// Prints nothing when the criteria contain no condition.
    Filter {
        /// Criteria as a JSON object, or `-` to read stdin
        criteria: String,
    },

    /// Encode list options into a query string
    Query {
        /// List options as a JSON object, or `-` to read stdin
        #[arg(long, value_name = "JSON")]
        options: Option<String>,

        /// Criteria compiled into the `q` parameter, or `-` to read stdin
        #[arg(long, value_name = "JSON")]
        criteria: Option<String>,

        /// Resource path to prefix; `?` is added only when needed
        #[arg(long)]
        path: Option<String>,
    },
}
