/// Core Module
///
/// This module contains the shared infrastructure of neo4j-learning: the
/// error type and the database layer that wraps the Neo4j driver.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Neo4jError, Result};
