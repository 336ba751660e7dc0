/// Driver Seam
///
/// The database itself lives behind these two traits. A [`Connector`] opens
/// a [`Session`] (the driver handle) for a configuration, and the session
/// forwards Cypher text and parameters to the server untouched.

use crate::config::Neo4jConfig;
use crate::core::Result;
use serde_json::{Map, Value};

/// Parameter mapping passed alongside a statement.
pub type Params = Map<String, Value>;

/// A single result row keyed by column name, in column order.
pub type Record = Map<String, Value>;

/// What the caller intends a statement to do. Connectors may use it to pick
/// a server; the Bolt connector runs both in a single-attempt transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Ad-hoc queries from the shell and the example catalog
    Read,
    /// Data loading and clearing
    Write,
}

/// An open handle to the database.
pub trait Session {
    /// Runs `statement` with `params` and collects every row.
    ///
    /// Errors from the server are returned as-is; no retry is attempted.
    fn run(&mut self, statement: &str, params: &Params, mode: AccessMode) -> Result<Vec<Record>>;
}

/// Opens driver handles.
pub trait Connector {
    type Session: Session;

    /// Makes exactly one attempt to open a handle for `config`.
    fn open(&self, config: &Neo4jConfig) -> Result<Self::Session>;
}

impl<C: Connector + ?Sized> Connector for &C {
    type Session = C::Session;

    fn open(&self, config: &Neo4jConfig) -> Result<Self::Session> {
        (**self).open(config)
    }
}
