/// Connection Manager Module
///
/// Higher-level operations built on a single [`Neo4jConnection`]: liveness
/// checks, server information and clearing the graph. Every query still goes
/// straight through to the driver.

use super::bolt::BoltConnector;
use super::connection::Neo4jConnection;
use super::driver::{Connector, Params, Record};
use crate::config::Neo4jConfig;
use crate::core::Result;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// Round-trip statement used by [`Neo4jManager::test_connection`].
pub const LIVENESS_QUERY: &str = "RETURN 1 AS test";
pub const DATABASE_INFO_QUERY: &str = "CALL dbms.components() YIELD name, versions, edition";
pub const CLEAR_DATABASE_QUERY: &str = "MATCH (n) DETACH DELETE n";

/// Server details reported by `dbms.components()`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatabaseInfo {
    #[serde(default = "unknown")]
    pub name: String,
    #[serde(default = "unknown", rename = "versions", deserialize_with = "first_version")]
    pub version: String,
    #[serde(default = "unknown")]
    pub edition: String,
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn first_version<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let versions = Vec::<String>::deserialize(deserializer)?;
    Ok(versions.into_iter().next().unwrap_or_else(unknown))
}

/// Database manager owning one connection.
pub struct Neo4jManager<C: Connector = BoltConnector> {
    connection: Neo4jConnection<C>,
}

impl Neo4jManager<BoltConnector> {
    pub fn new(config: Neo4jConfig) -> Self {
        Neo4jManager {
            connection: Neo4jConnection::new(config),
        }
    }
}

impl<C: Connector> Neo4jManager<C> {
    pub fn with_connector(config: Neo4jConfig, connector: C) -> Self {
        Neo4jManager {
            connection: Neo4jConnection::with_connector(config, connector),
        }
    }

    pub fn connection(&mut self) -> &mut Neo4jConnection<C> {
        &mut self.connection
    }

    pub fn config(&self) -> &Neo4jConfig {
        self.connection.config()
    }

    /// Tests the database connection.
    ///
    /// # Returns
    ///
    /// `true` if the server answered the liveness query with 1, `false` on any
    /// failure. A single attempt is made and the failure is logged.
    pub fn test_connection(&mut self) -> bool {
        match self.check_connection() {
            Ok(alive) => alive,
            Err(e) => {
                warn!(uri = self.config().uri(), error = %e, "Connection test failed");
                false
            }
        }
    }

    /// Same check as [`Self::test_connection`], returning the error instead of logging it.
    pub fn check_connection(&mut self) -> Result<bool> {
        let rows = self.connection.execute_query(LIVENESS_QUERY, &Params::new())?;
        Ok(rows
            .first()
            .and_then(|row| row.get("test"))
            .and_then(Value::as_i64)
            == Some(1))
    }

    /// Forwards a read statement to the connection.
    pub fn execute_query(&mut self, statement: &str, params: &Params) -> Result<Vec<Record>> {
        self.connection.execute_query(statement, params)
    }

    /// Forwards a statement to the connection inside a write transaction.
    pub fn execute_write_query(&mut self, statement: &str, params: &Params) -> Result<Vec<Record>> {
        self.connection.execute_write_query(statement, params)
    }

    /// Returns name, version and edition of the first server component, if any.
    pub fn get_database_info(&mut self) -> Result<Option<DatabaseInfo>> {
        let rows = self.connection.execute_query(DATABASE_INFO_QUERY, &Params::new())?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(Value::Object(row))?)),
            None => Ok(None),
        }
    }

    /// Deletes every node and relationship in the database.
    pub fn clear_database(&mut self) -> Result<()> {
        self.connection.execute_write_query(CLEAR_DATABASE_QUERY, &Params::new())?;
        info!(database = self.config().database(), "Database cleared");
        Ok(())
    }

    /// Releases the driver handle.
    pub fn close(&mut self) {
        self.connection.close();
    }
}
