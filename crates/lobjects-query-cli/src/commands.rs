//! Command execution.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lobjects_query::{ColumnMap, Compiler, ListOptions, SearchCriteria};
use tracing::debug;

use crate::cli::{Cli, Command};

/// Runs a parsed command line.
///
/// Returns the text to print, or `None` when there is nothing to print (a
/// filter for empty criteria). `stdin` is only read for `-` arguments.
pub fn run(cli: &Cli, stdin: &mut dyn Read) -> Result<Option<String>> {
    let columns = match &cli.columns {
        Some(path) => load_column_map(path)?,
        None => ColumnMap::default(),
    };
    let compiler = Compiler::new(columns);
    let mut input = Input::new(stdin);

    match &cli.command {
        Command::Filter { criteria } => {
            let criteria = parse_criteria(&input.read(criteria)?)?;
            Ok(compiler.compile(&criteria)?)
        }
        Command::Query {
            options,
            criteria,
            path,
        } => {
            let options = options.as_deref().map(|arg| input.read(arg)).transpose()?;
            let criteria = criteria.as_deref().map(|arg| input.read(arg)).transpose()?;

            let mut list_options = match options {
                Some(text) => ListOptions::from_json_str(&text)
                    .context("failed to parse list options")?,
                None => ListOptions::default(),
            };

            if let Some(text) = criteria {
                let criteria = parse_criteria(&text)?;
                list_options = list_options.with_criteria_using(&compiler, &criteria)?;
            }

            let query = list_options.encode_with(compiler.columns())?;
            match path {
                Some(path) if query.is_empty() => Ok(Some(path.clone())),
                Some(path) => Ok(Some(format!("{path}?{query}"))),
                None => Ok(Some(query)),
            }
        }
    }
}

/// Loads a column map from a YAML file.
pub fn load_column_map(path: &Path) -> Result<ColumnMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read column map {}", path.display()))?;
    let columns: ColumnMap = serde_yaml::from_str(&text)
        .with_context(|| format!("invalid column map {}", path.display()))?;
    debug!(path = %path.display(), strict = columns.is_strict(), "loaded column map");
    Ok(columns)
}

fn parse_criteria(text: &str) -> Result<SearchCriteria> {
    SearchCriteria::from_json_str(text).context("failed to parse criteria")
}

/// Resolves JSON arguments, reading stdin for `-` at most once.
struct Input<'a> {
    stdin: &'a mut dyn Read,
    consumed: bool,
}

impl<'a> Input<'a> {
    fn new(stdin: &'a mut dyn Read) -> Self {
        Input {
            stdin,
            consumed: false,
        }
    }

    fn read(&mut self, arg: &str) -> Result<String> {
        if arg != "-" {
            return Ok(arg.to_string());
        }
        if self.consumed {
            bail!("only one argument can be read from stdin");
        }
        self.consumed = true;

        let mut text = String::new();
        self.stdin
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    }
}
