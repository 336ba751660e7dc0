/// # Test Utilities Module
///
/// In-memory stand-ins for the driver so connection, manager, command and
/// REPL behaviour can be tested without a running Neo4j server.
///
/// This module provides:
/// - `FakeConnector`, which counts open attempts and records every statement
/// - Scripted responses and failures per statement
/// - Small builders for configs and records

use crate::config::Neo4jConfig;
use crate::core::db::{AccessMode, Connector, Params, Record, Session};
use crate::core::{Neo4jError, Result};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// A statement as seen by the fake driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedStatement {
    pub statement: String,
    pub params: Params,
    pub mode: AccessMode,
}

#[derive(Debug, Clone)]
enum Scripted {
    Rows(Vec<Record>),
    Failure(String),
}

#[derive(Debug, Default)]
struct Script {
    responses: HashMap<String, Scripted>,
    executed: Vec<ExecutedStatement>,
}

/// Fake connector; use it by reference so the test keeps access to its counters.
#[derive(Debug, Default)]
pub struct FakeConnector {
    unreachable: bool,
    open_attempts: Cell<usize>,
    script: Rc<RefCell<Script>>,
}

impl FakeConnector {
    /// A reachable database that answers `RETURN 1 AS test` like a real server.
    pub fn new() -> Self {
        let connector = FakeConnector::default();
        connector.respond("RETURN 1 AS test", vec![record(&[("test", Value::from(1))])]);
        connector
    }

    /// A database that can never be reached.
    pub fn unreachable() -> Self {
        FakeConnector {
            unreachable: true,
            ..FakeConnector::default()
        }
    }

    /// Answers `statement` (compared after trimming) with `rows`.
    pub fn respond(&self, statement: &str, rows: Vec<Record>) -> &Self {
        self.script
            .borrow_mut()
            .responses
            .insert(statement.trim().to_string(), Scripted::Rows(rows));
        self
    }

    /// Makes `statement` fail with `message`.
    pub fn fail(&self, statement: &str, message: &str) -> &Self {
        self.script
            .borrow_mut()
            .responses
            .insert(statement.trim().to_string(), Scripted::Failure(message.to_string()));
        self
    }

    pub fn open_attempts(&self) -> usize {
        self.open_attempts.get()
    }

    pub fn executed(&self) -> Vec<ExecutedStatement> {
        self.script.borrow().executed.clone()
    }
}

impl Connector for FakeConnector {
    type Session = FakeSession;

    fn open(&self, config: &Neo4jConfig) -> Result<FakeSession> {
        self.open_attempts.set(self.open_attempts.get() + 1);
        if self.unreachable {
            return Err(Neo4jError::Connector(format!(
                "Connection refused while connecting to {}",
                config.uri()
            )));
        }
        Ok(FakeSession {
            script: Rc::clone(&self.script),
        })
    }
}

pub struct FakeSession {
    script: Rc<RefCell<Script>>,
}

impl Session for FakeSession {
    fn run(&mut self, statement: &str, params: &Params, mode: AccessMode) -> Result<Vec<Record>> {
        let mut script = self.script.borrow_mut();
        script.executed.push(ExecutedStatement {
            statement: statement.to_string(),
            params: params.clone(),
            mode,
        });
        match script.responses.get(statement.trim()) {
            Some(Scripted::Rows(rows)) => Ok(rows.clone()),
            Some(Scripted::Failure(message)) => Err(Neo4jError::Connector(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}

/// Config pointing at a local server with default credentials.
pub fn sample_config() -> Neo4jConfig {
    Neo4jConfig::new("bolt://localhost:7687", "neo4j", "password", "neo4j").unwrap()
}

/// Builds a record from column/value pairs, keeping their order.
pub fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Decodes captured output bytes.
pub fn output_text(output: Vec<u8>) -> String {
    String::from_utf8(output).unwrap()
}
