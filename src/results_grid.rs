/// Results Grid Module
///
/// Turns query records into text for the terminal: a numbered list, an
/// aligned table, or an export in CSV, JSON or Markdown.
use crate::core::db::Record;
use crate::core::{Neo4jError, Result};
use clap::ValueEnum;
use serde_json::Value;

/// Represents a row of rendered cells in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
}

/// Represents the entire grid structure.
#[derive(Debug, Clone, Default)]
pub struct ResultsGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    records: Vec<Record>,
}

impl ResultsGrid {
    /// Creates a new, empty ResultsGrid.
    pub fn new() -> Self {
        ResultsGrid::default()
    }

    /// Builds a grid from records. Headers are every column name in the
    /// order first seen; a record lacking a column gets an empty cell.
    pub fn from_records(records: &[Record]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| Row {
                cells: headers
                    .iter()
                    .map(|header| record.get(header).map(render_value).unwrap_or_default())
                    .collect(),
            })
            .collect();

        ResultsGrid {
            headers,
            rows,
            records: records.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the grid as an aligned text table.
    pub fn render(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.cells.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut output = String::new();
        output.push_str(&pad_line(&self.headers, &widths));
        output.push('\n');
        let underline: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        output.push_str(&underline.join("-+-"));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&pad_line(&row.cells, &widths));
            output.push('\n');
        }
        output
    }

    /// Exports the grid data to a specified format.
    /// Supported formats: CSV, JSON, Markdown.
    pub fn export(&self, format: &str) -> Result<String> {
        match format.to_lowercase().as_str() {
            "csv" => Ok(self.export_to_csv()),
            "json" => self.export_to_json(),
            "markdown" | "md" => Ok(self.export_to_markdown()),
            _ => Err(Neo4jError::Output(format!(
                "Unsupported export format: '{}'. Supported formats: csv, json, markdown",
                format
            ))),
        }
    }

    fn export_to_csv(&self) -> String {
        let mut output = String::new();
        if !self.headers.is_empty() {
            let headers: Vec<String> = self.headers.iter().map(|h| csv_field(h)).collect();
            output.push_str(&headers.join(","));
            output.push('\n');
        }
        for row in &self.rows {
            let cells: Vec<String> = row.cells.iter().map(|c| csv_field(c)).collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }
        output
    }

    fn export_to_json(&self) -> Result<String> {
        // The original values are kept so numbers and lists stay typed
        Ok(serde_json::to_string(&self.records)?)
    }

    fn export_to_markdown(&self) -> String {
        let mut output = String::new();
        if !self.headers.is_empty() {
            output.push_str(&format!("| {} |", self.headers.join(" | ")));
            output.push('\n');
            let underline: Vec<String> = self.headers.iter().map(|h| "-".repeat(h.len().max(3))).collect();
            output.push_str(&format!("| {} |", underline.join(" | ")));
            output.push('\n');
        }
        for row in &self.rows {
            let cells: Vec<String> = row.cells.iter().map(|c| c.replace('|', "\\|")).collect();
            output.push_str(&format!("| {} |", cells.join(" | ")));
            output.push('\n');
        }
        output
    }
}

fn pad_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    padded.join(" | ").trim_end().to_string()
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Strings render bare; everything else as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// How query results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Numbered list of records
    #[default]
    List,
    Table,
    Csv,
    Json,
    #[value(alias = "md")]
    Markdown,
}

/// Formats `records` for printing in the chosen format.
pub fn format_records(records: &[Record], format: OutputFormat) -> Result<String> {
    if records.is_empty() {
        return Ok("No results returned.\n".to_string());
    }

    let grid = ResultsGrid::from_records(records);
    match format {
        OutputFormat::List => {
            let mut output = format!("\nResults ({} records):\n", records.len());
            for (i, record) in records.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, Value::Object(record.clone())));
            }
            Ok(output)
        }
        OutputFormat::Table => Ok(format!("{}({} rows)\n", grid.render(), grid.rows.len())),
        OutputFormat::Csv => grid.export("csv"),
        OutputFormat::Json => grid.export("json").map(|json| json + "\n"),
        OutputFormat::Markdown => grid.export("markdown"),
    }
}
