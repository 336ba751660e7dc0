//! Command-line surface: argument parsing, config resolution and dispatch.

use crate::commands;
use crate::config::{default_config_path, load_config, ConnectionSettings, Neo4jConfig};
use crate::core::db::{Connector, Neo4jManager};
use crate::core::Result;
use crate::results_grid::OutputFormat;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, Level};

const AFTER_HELP: &str = "Examples:
  neo4j-learning test          # Test connection
  neo4j-learning examples      # Run examples
  neo4j-learning interactive   # Start interactive mode
  neo4j-learning clear         # Clear database";

#[derive(Parser, Debug)]
#[command(name = "neo4j-learning", version)]
#[command(about = "Neo4j Learning CLI", long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Neo4j URI (default: bolt://localhost:7687)
    #[arg(long, global = true)]
    pub uri: Option<String>,

    /// Neo4j username (default: neo4j)
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Neo4j password (default: password)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Neo4j database name (default: neo4j)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Records fetched per round trip (default: 200)
    #[arg(long, global = true)]
    pub fetch_size: Option<usize>,

    /// TOML file with a [connection] table
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How query results are printed: list, table, csv, json or markdown
    #[arg(long, global = true, value_enum, ignore_case = true, default_value_t = OutputFormat::List)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    /// Test the connection and show server details
    Test,
    /// Load sample data and run the example queries
    Examples,
    /// Start an interactive Cypher shell
    Interactive,
    /// Delete all nodes and relationships (asks for confirmation)
    Clear,
}

impl Cli {
    /// Connection values given on the command line.
    pub fn settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            uri: self.uri.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            fetch_size: self.fetch_size,
        }
    }

    /// Flags, then environment, then the config file, then defaults.
    ///
    /// Without `--config`, the per-user file is read when it exists.
    pub fn resolve_config<F>(&self, lookup: F) -> Result<Neo4jConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => default_config_path().filter(|path| path.is_file()),
        };
        let file = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                load_config(&path)?.connection
            }
            None => None,
        };
        Neo4jConfig::resolve(self.settings(), file, lookup)
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Dispatches the parsed command. `Ok(false)` means the command ran but the
/// database could not be reached.
pub fn run<C: Connector, R: BufRead, W: Write>(
    command: CliCommand,
    format: OutputFormat,
    manager: &mut Neo4jManager<C>,
    input: R,
    out: &mut W,
) -> Result<bool> {
    let outcome = match command {
        CliCommand::Test => commands::test_connection(manager, out),
        CliCommand::Examples => commands::run_examples(manager, format, out),
        CliCommand::Interactive => commands::interactive(manager, input, format, out),
        CliCommand::Clear => commands::clear_database(manager, input, out),
    };
    manager.close();
    outcome
}
