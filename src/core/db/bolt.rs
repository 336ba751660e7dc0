/// Bolt Driver Module
///
/// Production [`Connector`] backed by `neo4rs`. The driver is async, so each
/// session owns a current-thread tokio runtime and blocks on every call;
/// callers only ever see synchronous methods.

use super::driver::{AccessMode, Connector, Params, Record, Session};
use crate::config::Neo4jConfig;
use crate::core::{Neo4jError, Result};
use neo4rs::{query, BoltList, BoltMap, BoltNull, BoltString, BoltType, ConfigBuilder, Graph, Query};
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

/// Statement used to confirm the server accepts our credentials.
const VERIFY_STATEMENT: &str = "RETURN 1";

/// Opens Bolt handles with `neo4rs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoltConnector;

impl Connector for BoltConnector {
    type Session = BoltSession;

    fn open(&self, config: &Neo4jConfig) -> Result<BoltSession> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let driver_config = ConfigBuilder::default()
            .uri(config.uri())
            .user(config.username())
            .password(config.password())
            .db(config.database())
            .fetch_size(config.fetch_size())
            .max_connections(1)
            .build()
            .map_err(|source| connection_error(config, source))?;

        let graph = runtime
            .block_on(Graph::connect(driver_config))
            .map_err(|source| connection_error(config, source))?;

        // The pool connects lazily; force one round trip so unreachable hosts
        // and rejected credentials surface here rather than on the first query.
        // Graph::run retries with backoff, a transaction is attempted once.
        runtime
            .block_on(verify(&graph))
            .map_err(|source| connection_error(config, source))?;

        info!(uri = config.uri(), database = config.database(), "Connected to Neo4j");
        Ok(BoltSession { runtime, graph })
    }
}

fn connection_error(config: &Neo4jConfig, source: neo4rs::Error) -> Neo4jError {
    Neo4jError::Connection {
        uri: config.uri().to_string(),
        source,
    }
}

/// An open Bolt handle. Dropping it closes the underlying pool.
pub struct BoltSession {
    runtime: Runtime,
    graph: Graph,
}

impl Session for BoltSession {
    fn run(&mut self, statement: &str, params: &Params, mode: AccessMode) -> Result<Vec<Record>> {
        debug!(?mode, params = params.len(), "Running statement");
        let query = build_query(statement, params)?;
        self.runtime.block_on(fetch_in_transaction(&self.graph, query))
    }
}

async fn verify(graph: &Graph) -> neo4rs::Result<()> {
    let mut txn = graph.start_txn().await?;
    txn.run(query(VERIFY_STATEMENT)).await?;
    txn.rollback().await
}

/// Runs `query` in an explicit transaction and commits once every row is
/// drained. Both access modes take this path: `Graph::execute` retries on
/// transient failures, a transaction never does.
async fn fetch_in_transaction(graph: &Graph, query: Query) -> Result<Vec<Record>> {
    let mut txn = graph.start_txn().await?;
    let mut stream = txn.execute(query).await?;
    let mut records = Vec::new();
    while let Some(row) = stream.next(txn.handle()).await? {
        records.push(row.to::<Record>()?);
    }
    txn.commit().await?;
    Ok(records)
}

/// Attaches every parameter to the statement without inspecting it.
pub fn build_query(statement: &str, params: &Params) -> Result<Query> {
    params
        .iter()
        .try_fold(query(statement), |q, (key, value)| -> Result<Query> {
            Ok(q.param(key, to_bolt(key, value)?))
        })
}

/// Converts a JSON parameter value into its Bolt counterpart.
///
/// Integers stay integers and every other number is sent as a float. Bolt
/// integers are signed 64-bit, so a larger unsigned value is a
/// [`Neo4jError::Parameter`] rather than a rounded float.
pub fn to_bolt(name: &str, value: &Value) -> Result<BoltType> {
    let bolt = match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::from(*b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => BoltType::from(i),
            (None, _) if n.is_u64() => {
                return Err(Neo4jError::Parameter(format!(
                    "parameter '{}' value {} does not fit in a 64-bit signed integer",
                    name, n
                )))
            }
            (None, Some(f)) => BoltType::from(f),
            (None, None) => {
                return Err(Neo4jError::Parameter(format!(
                    "parameter '{}' value {} is not representable",
                    name, n
                )))
            }
        },
        Value::String(s) => BoltType::from(s.as_str()),
        Value::Array(items) => {
            let mut list = BoltList::new();
            for item in items {
                list.push(to_bolt(name, item)?);
            }
            BoltType::List(list)
        }
        Value::Object(entries) => {
            let mut map = BoltMap::new();
            for (key, item) in entries {
                map.put(BoltString::from(key.as_str()), to_bolt(name, item)?);
            }
            BoltType::Map(map)
        }
    };
    Ok(bolt)
}
