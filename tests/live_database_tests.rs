//! Tests against a real Neo4j server.
//!
//! Ignored by default. Start a server and run:
//!
//! ```text
//! NEO4J_URI=bolt://localhost:7687 NEO4J_PASSWORD=... cargo test -- --ignored
//! ```

#[cfg(test)]
mod tests {
    use neo4j_learning::config::Neo4jConfig;
    use neo4j_learning::core::db::{Neo4jManager, Params};
    use neo4j_learning::core::Neo4jError;
    use serde_json::json;

    fn live_manager() -> Neo4jManager {
        Neo4jManager::new(Neo4jConfig::from_env().unwrap())
    }

    #[test]
    #[ignore = "requires a running Neo4j server"]
    fn test_return_one() {
        let mut manager = live_manager();
        assert!(manager.test_connection());

        let rows = manager.execute_query("RETURN 1", &Params::new()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values().next(), Some(&json!(1)));
    }

    #[test]
    #[ignore = "requires a running Neo4j server"]
    fn test_malformed_query_surfaces_driver_error() {
        let mut manager = live_manager();
        match manager.execute_query("RETRUN 1", &Params::new()) {
            Err(Neo4jError::Driver(_)) => {}
            other => panic!("Expected the driver's error, got {:?}", other),
        }
    }

    #[test]
    #[ignore = "requires a running Neo4j server"]
    fn test_parameters_round_trip_through_write_transaction() {
        let mut manager = live_manager();
        let mut params = Params::new();
        params.insert("name".to_string(), json!("neo4j-learning-live-test"));
        params.insert("tags".to_string(), json!(["a", "b"]));

        manager
            .execute_write_query("CREATE (:LiveTest {name: $name, tags: $tags})", &params)
            .unwrap();
        let rows = manager
            .execute_query(
                "MATCH (t:LiveTest {name: $name}) RETURN t.name AS name, t.tags AS tags",
                &params,
            )
            .unwrap();
        manager
            .execute_write_query("MATCH (t:LiveTest {name: $name}) DETACH DELETE t", &params)
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&json!("neo4j-learning-live-test")));
        assert_eq!(rows[0].get("tags"), Some(&json!(["a", "b"])));
    }

    #[test]
    #[ignore = "requires a running Neo4j server"]
    fn test_database_info() {
        let mut manager = live_manager();
        let info = manager.get_database_info().unwrap().expect("dbms.components() returned nothing");
        assert!(!info.version.is_empty());
    }
}
