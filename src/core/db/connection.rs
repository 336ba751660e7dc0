/// Connection Management Module
///
/// This module owns the lifecycle of the single driver handle a connection
/// is allowed to hold: opened lazily on first use, reused afterwards, and
/// released on `close` or drop.

use super::bolt::BoltConnector;
use super::driver::{AccessMode, Connector, Params, Record, Session};
use crate::config::Neo4jConfig;
use crate::core::Result;
use tracing::info;

/// Connection to one Neo4j database through a [`Connector`].
pub struct Neo4jConnection<C: Connector = BoltConnector> {
    config: Neo4jConfig,
    connector: C,
    /// Active handle (None until first use or after `close`)
    session: Option<C::Session>,
}

impl Neo4jConnection<BoltConnector> {
    /// Creates a Bolt-backed connection. Nothing is opened yet.
    pub fn new(config: Neo4jConfig) -> Self {
        Neo4jConnection::with_connector(config, BoltConnector)
    }
}

impl<C: Connector> Neo4jConnection<C> {
    /// Creates a connection that opens its handle through `connector`.
    pub fn with_connector(config: Neo4jConfig, connector: C) -> Self {
        Neo4jConnection {
            config,
            connector,
            session: None,
        }
    }

    pub fn config(&self) -> &Neo4jConfig {
        &self.config
    }

    /// Opens the handle if none is open yet.
    ///
    /// # Returns
    ///
    /// `Ok(())` once a handle is held, or the connector's error after a single attempt.
    pub fn connect(&mut self) -> Result<()> {
        self.session()?;
        Ok(())
    }

    /// Releases the handle, if any.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            info!(uri = self.config.uri(), "Neo4j connection closed");
        }
    }

    /// Checks if a handle is currently held
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Runs a statement in auto-commit mode.
    ///
    /// The text and parameters are forwarded unchanged; errors from the
    /// driver are returned without being retried.
    pub fn execute_query(&mut self, statement: &str, params: &Params) -> Result<Vec<Record>> {
        self.session()?.run(statement, params, AccessMode::Read)
    }

    /// Runs a statement inside an explicit write transaction.
    pub fn execute_write_query(&mut self, statement: &str, params: &Params) -> Result<Vec<Record>> {
        self.session()?.run(statement, params, AccessMode::Write)
    }

    fn session(&mut self) -> Result<&mut C::Session> {
        let session = match self.session.take() {
            Some(session) => session,
            None => self.connector.open(&self.config)?,
        };
        Ok(self.session.insert(session))
    }
}

impl<C: Connector> Drop for Neo4jConnection<C> {
    fn drop(&mut self) {
        self.close();
    }
}
