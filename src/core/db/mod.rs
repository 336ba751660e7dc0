/// Database Module
///
/// This module wraps the external Neo4j driver, organized into focused
/// submodules.
///
/// ## Architecture
///
/// - **Driver seam** (`driver.rs`): `Connector`/`Session` traits and the record types
/// - **Bolt driver** (`bolt.rs`): the `neo4rs`-backed connector used in production
/// - **Connection Management** (`connection.rs`): lazy, single-handle connection
/// - **Manager** (`manager.rs`): liveness check, server info and clearing the graph
///
/// ## Error Handling
///
/// All database operations return the crate-wide `Neo4jError`; driver
/// errors are wrapped without being altered.
pub mod bolt;
pub mod connection;
pub mod driver;
pub mod manager;

pub use bolt::{BoltConnector, BoltSession};
pub use connection::Neo4jConnection;
pub use driver::{AccessMode, Connector, Params, Record, Session};
pub use manager::{DatabaseInfo, Neo4jManager};
