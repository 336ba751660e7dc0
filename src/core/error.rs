/// Error Module
///
/// This module defines the error type shared by every layer of the crate,
/// from configuration loading down to the Bolt driver wrapper. Driver
/// failures are carried unchanged so callers see exactly what Neo4j reported.
use thiserror::Error;

/// Error type for neo4j-learning.
///
/// The variants fall into three groups:
/// - Configuration problems detected before any connection is attempted
/// - Failures opening a handle or running a statement through the driver
/// - Local I/O, JSON and output-format errors
#[derive(Error, Debug)]
pub enum Neo4jError {
    /// Invalid or missing connection parameters
    #[error("Configuration error: {0}")]
    Config(String),

    /// The driver could not open a handle (unreachable host, rejected credentials)
    #[error("Connection error: failed to connect to {uri}: {source}")]
    Connection {
        uri: String,
        #[source]
        source: neo4rs::Error,
    },

    /// Errors raised by the driver while running a statement
    #[error("Driver error: {0}")]
    Driver(#[from] neo4rs::Error),

    /// A result row could not be decoded into a record
    #[error("Decode error: {0}")]
    Decode(#[from] neo4rs::DeError),

    /// A query parameter has no exact Bolt representation
    #[error("Parameter error: {0}")]
    Parameter(String),

    /// Failures reported by a connector that is not backed by neo4rs
    #[error("Connector error: {0}")]
    Connector(String),

    /// Output formatting errors (unsupported export formats)
    #[error("Output error: {0}")]
    Output(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing and conversion errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Neo4jError {
    /// True for the configuration error kind.
    pub fn is_config(&self) -> bool {
        matches!(self, Neo4jError::Config(_))
    }

    /// True when the failure happened while opening a handle.
    pub fn is_connection(&self) -> bool {
        matches!(self, Neo4jError::Connection { .. })
    }
}

/// Type alias for Result to use Neo4jError as the error type.
pub type Result<T> = std::result::Result<T, Neo4jError>;
