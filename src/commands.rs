//! The flows behind the `test`, `examples`, `interactive` and `clear`
//! subcommands. Each returns `Ok(false)` when the database cannot be reached
//! so the binary can exit non-zero.

use crate::catalog::{Example, ANALYSIS_EXAMPLES, QUERY_EXAMPLES, SAMPLE_DATA};
use crate::core::db::{Connector, Neo4jManager, Params};
use crate::core::Result;
use crate::repl;
use crate::results_grid::{format_records, OutputFormat};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Runs the liveness check, printing the reason when it fails.
fn ensure_connected<C: Connector, W: Write>(manager: &mut Neo4jManager<C>, out: &mut W) -> Result<bool> {
    match manager.check_connection() {
        Ok(alive) => Ok(alive),
        Err(e) => {
            writeln!(out, "Connection test failed: {}", e)?;
            Ok(false)
        }
    }
}

/// `test`: checks the connection and prints server details.
pub fn test_connection<C: Connector, W: Write>(manager: &mut Neo4jManager<C>, out: &mut W) -> Result<bool> {
    if !ensure_connected(manager, out)? {
        writeln!(out, "❌ Connection failed!")?;
        return Ok(false);
    }

    writeln!(out, "✅ Connection successful!")?;
    match manager.get_database_info() {
        Ok(Some(info)) => {
            writeln!(out, "Database: {}", info.name)?;
            writeln!(out, "Version: {}", info.version)?;
            writeln!(out, "Edition: {}", info.edition)?;
        }
        Ok(None) => {}
        // Not every Bolt server exposes dbms.components()
        Err(e) => warn!(error = %e, "Could not read database info"),
    }
    Ok(true)
}

/// Loads the sample graph, one write transaction per statement.
pub fn create_sample_data<C: Connector, W: Write>(manager: &mut Neo4jManager<C>, out: &mut W) -> Result<()> {
    for (i, statement) in SAMPLE_DATA.iter().enumerate() {
        writeln!(out, "Executing query {}...", i + 1)?;
        manager.execute_write_query(statement, &Params::new())?;
    }
    writeln!(out, "Sample data created successfully!")?;
    Ok(())
}

/// Runs each example under a banner. A failing example is reported and
/// the rest still run.
pub fn run_example_set<C: Connector, W: Write>(
    manager: &mut Neo4jManager<C>,
    examples: &[Example],
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    for example in examples {
        writeln!(out, "\n=== {} ===", example.name)?;
        debug!(example = example.name, "Running example");
        match manager.execute_query(example.query, &Params::new()) {
            Ok(records) => write!(out, "{}", format_records(&records, format)?)?,
            Err(e) => writeln!(out, "Error executing query: {}", e)?,
        }
    }
    Ok(())
}

/// `examples`: loads the sample data and runs every catalog query.
pub fn run_examples<C: Connector, W: Write>(
    manager: &mut Neo4jManager<C>,
    format: OutputFormat,
    out: &mut W,
) -> Result<bool> {
    writeln!(out, "=== Neo4j Learning Examples ===\n")?;

    if !ensure_connected(manager, out)? {
        writeln!(out, "Failed to connect to Neo4j. Please ensure Neo4j is running.")?;
        return Ok(false);
    }
    writeln!(out, "Connection successful!\n")?;

    writeln!(out, "Creating sample data...")?;
    create_sample_data(manager, out)?;

    writeln!(out, "\nRunning query examples...")?;
    run_example_set(manager, QUERY_EXAMPLES, format, out)?;

    writeln!(out, "\nRunning graph analysis examples...")?;
    run_example_set(manager, ANALYSIS_EXAMPLES, format, out)?;

    writeln!(out, "\n=== Examples completed ===")?;
    Ok(true)
}

/// `interactive`: opens the Cypher shell once the connection is confirmed.
pub fn interactive<C: Connector, R: BufRead, W: Write>(
    manager: &mut Neo4jManager<C>,
    input: R,
    format: OutputFormat,
    out: &mut W,
) -> Result<bool> {
    if !ensure_connected(manager, out)? {
        writeln!(out, "❌ Cannot connect to database!")?;
        return Ok(false);
    }
    repl::run_repl(manager, input, out, format)?;
    Ok(true)
}

/// `clear`: deletes the whole graph after the user types `yes`.
pub fn clear_database<C: Connector, R: BufRead, W: Write>(
    manager: &mut Neo4jManager<C>,
    mut input: R,
    out: &mut W,
) -> Result<bool> {
    if !ensure_connected(manager, out)? {
        writeln!(out, "❌ Cannot connect to database!")?;
        return Ok(false);
    }

    write!(out, "Are you sure you want to clear all data? (yes/no): ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;

    if answer.trim().eq_ignore_ascii_case("yes") {
        manager.clear_database()?;
        writeln!(out, "✅ Database cleared!")?;
    } else {
        writeln!(out, "Operation cancelled.")?;
    }
    Ok(true)
}
