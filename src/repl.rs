use crate::catalog::HELP_QUERIES;
use crate::core::db::{Connector, Neo4jManager, Params};
use crate::core::Result;
use crate::results_grid::{format_records, OutputFormat};
use std::io::{BufRead, Write};
use tracing::debug;

pub const PROMPT: &str = "neo4j> ";

/// Represents a parsed shell command.
#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Empty,
    Cypher(String),
}

/// Parses one line of shell input.
///
/// `quit`, `exit`, `q` and `help` are matched case-insensitively; anything
/// else that is not blank is sent to the database as Cypher.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Empty;
    }
    match input.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "help" => Command::Help,
        _ => Command::Cypher(input.to_string()),
    }
}

pub fn help_text() -> String {
    let mut text = String::from("\nAvailable commands:\n");
    text.push_str("  quit, exit, q  - Exit interactive mode\n");
    text.push_str("  help           - Show this help message\n");
    text.push_str("\nExample queries:\n");
    for query in HELP_QUERIES {
        text.push_str(&format!("  {}\n", query));
    }
    text
}

/// Runs the interactive Cypher shell until `quit` or end of input.
///
/// Query failures are printed and the loop continues; only I/O errors on
/// the shell's own input or output end it early.
pub fn run_repl<C: Connector, R: BufRead, W: Write>(
    manager: &mut Neo4jManager<C>,
    mut input: R,
    output: &mut W,
    format: OutputFormat,
) -> Result<()> {
    writeln!(output, "=== Neo4j Interactive Mode ===")?;
    writeln!(output, "Enter Cypher queries (type 'quit' to exit)")?;
    writeln!(output, "Type 'help' for some example queries\n")?;

    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "\nGoodbye!")?;
            break;
        }

        match parse_command(&line) {
            Command::Quit => {
                writeln!(output, "Goodbye!")?;
                break;
            }
            Command::Help => write!(output, "{}", help_text())?,
            Command::Empty => continue,
            Command::Cypher(query) => {
                debug!(query = query.as_str(), "Executing shell query");
                match manager.execute_query(&query, &Params::new()) {
                    Ok(records) => write!(output, "{}", format_records(&records, format)?)?,
                    Err(e) => writeln!(output, "Error: {}", e)?,
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{output_text, record, sample_config, FakeConnector};
    use serde_json::json;

    #[test]
    fn test_parse_quit_commands() {
        for input in ["quit", "exit", "q", "QUIT", "  Exit  "] {
            assert_eq!(parse_command(input), Command::Quit);
        }
    }

    #[test]
    fn test_parse_help_and_empty() {
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("HELP\n"), Command::Help);
        assert_eq!(parse_command("   \n"), Command::Empty);
    }

    #[test]
    fn test_parse_cypher_query() {
        let cmd = parse_command("  MATCH (n) RETURN n LIMIT 5\n");
        assert_eq!(cmd, Command::Cypher("MATCH (n) RETURN n LIMIT 5".to_string()));

        // Only whole-word commands are special
        assert_eq!(
            parse_command("quit_time"),
            Command::Cypher("quit_time".to_string())
        );
    }

    #[test]
    fn test_help_lists_example_queries() {
        let text = help_text();
        for query in HELP_QUERIES {
            assert!(text.contains(query));
        }
    }

    #[test]
    fn test_repl_session() {
        let connector = FakeConnector::new();
        connector.respond("RETURN 1 AS n", vec![record(&[("n", json!(1))])]);
        connector.fail("RETRUN 1", "Invalid input 'RETRUN'");
        let mut manager = Neo4jManager::with_connector(sample_config(), &connector);

        let input = "help\n\nRETURN 1 AS n\nRETRUN 1\nMATCH (n) RETURN n\nquit\nRETURN 2\n";
        let mut out = Vec::new();
        run_repl(&mut manager, input.as_bytes(), &mut out, OutputFormat::List).unwrap();

        let text = output_text(out);
        assert!(text.contains("=== Neo4j Interactive Mode ==="));
        assert!(text.contains("Example queries:"));
        assert!(text.contains("Results (1 records):"));
        assert!(text.contains(r#"  1. {"n":1}"#));
        assert!(text.contains("Error: Connector error: Invalid input 'RETRUN'"));
        assert!(text.contains("No results returned."));
        assert!(text.ends_with("Goodbye!\n"));

        // Nothing after `quit` is executed
        let statements: Vec<String> = connector.executed().into_iter().map(|s| s.statement).collect();
        assert_eq!(statements, vec!["RETURN 1 AS n", "RETRUN 1", "MATCH (n) RETURN n"]);
    }

    #[test]
    fn test_repl_ends_at_end_of_input() {
        let connector = FakeConnector::new();
        let mut manager = Neo4jManager::with_connector(sample_config(), &connector);

        let mut out = Vec::new();
        run_repl(&mut manager, "RETURN 1 AS test".as_bytes(), &mut out, OutputFormat::Table).unwrap();

        let text = output_text(out);
        assert!(text.contains("test\n----\n1\n(1 rows)"));
        assert!(text.ends_with("\nGoodbye!\n"));
    }
}
