//! # lobq
//!
//! Command-line front end for [`lobjects_query`].
//!
//! ```text
//! lobq filter '{"code":"ABC","status":1}'
//! CODE eq 'ABC' and STATUS eq 1
//!
//! lobq query --options '{"limit":10,"sort":"FICHENO"}' --path /salesInvoices
//! /salesInvoices?limit=10&sort=FICHENO
//! ```
//!
//! Both subcommands accept `--columns <FILE>` to load a YAML column map.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::{load_column_map, run};
