//! Example catalog: sample data and the Cypher queries the `examples`
//! command walks through, plus the queries suggested by the shell's `help`.

/// A named example query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Example {
    pub name: &'static str,
    pub query: &'static str,
}

/// Write statements that build the sample social/employment graph.
pub const SAMPLE_DATA: &[&str] = &[
    // People
    "CREATE (alice:Person {name: 'Alice', age: 30, city: 'New York'})
     CREATE (bob:Person {name: 'Bob', age: 25, city: 'San Francisco'})
     CREATE (charlie:Person {name: 'Charlie', age: 35, city: 'Chicago'})
     CREATE (diana:Person {name: 'Diana', age: 28, city: 'Boston'})",
    // Companies
    "CREATE (techcorp:Company {name: 'TechCorp', industry: 'Technology'})
     CREATE (dataflow:Company {name: 'DataFlow', industry: 'Data Analytics'})
     CREATE (innovate:Company {name: 'Innovate Inc', industry: 'Consulting'})",
    // Employment
    "MATCH (alice:Person {name: 'Alice'})
     MATCH (techcorp:Company {name: 'TechCorp'})
     CREATE (alice)-[:WORKS_FOR {since: 2020, position: 'Software Engineer'}]->(techcorp)",
    "MATCH (bob:Person {name: 'Bob'})
     MATCH (dataflow:Company {name: 'DataFlow'})
     CREATE (bob)-[:WORKS_FOR {since: 2021, position: 'Data Scientist'}]->(dataflow)",
    "MATCH (charlie:Person {name: 'Charlie'})
     MATCH (innovate:Company {name: 'Innovate Inc'})
     CREATE (charlie)-[:WORKS_FOR {since: 2019, position: 'Senior Consultant'}]->(innovate)",
    // Friendships
    "MATCH (alice:Person {name: 'Alice'})
     MATCH (bob:Person {name: 'Bob'})
     CREATE (alice)-[:FRIENDS_WITH {since: 2018}]->(bob)",
    "MATCH (bob:Person {name: 'Bob'})
     MATCH (charlie:Person {name: 'Charlie'})
     CREATE (bob)-[:FRIENDS_WITH {since: 2020}]->(charlie)",
    "MATCH (alice:Person {name: 'Alice'})
     MATCH (diana:Person {name: 'Diana'})
     CREATE (alice)-[:FRIENDS_WITH {since: 2019}]->(diana)",
];

pub const QUERY_EXAMPLES: &[Example] = &[
    Example {
        name: "Find all people",
        query: "MATCH (p:Person) RETURN p.name, p.age, p.city ORDER BY p.name",
    },
    Example {
        name: "Find all companies",
        query: "MATCH (c:Company) RETURN c.name, c.industry ORDER BY c.name",
    },
    Example {
        name: "Find people who work for companies",
        query: "MATCH (p:Person)-[r:WORKS_FOR]->(c:Company)
                RETURN p.name, c.name, r.position, r.since
                ORDER BY p.name",
    },
    Example {
        name: "Find friends of Alice",
        query: "MATCH (alice:Person {name: 'Alice'})-[:FRIENDS_WITH]-(friend:Person)
                RETURN friend.name, friend.city
                ORDER BY friend.name",
    },
    Example {
        name: "Count relationships by type",
        query: "MATCH ()-[r]->()
                RETURN type(r) AS relationship_type, count(r) AS count
                ORDER BY count DESC",
    },
    Example {
        name: "Find people in the same city",
        query: "MATCH (p1:Person)-[:FRIENDS_WITH]-(p2:Person)
                WHERE p1.city = p2.city
                RETURN p1.name, p2.name, p1.city
                ORDER BY p1.city, p1.name",
    },
];

pub const ANALYSIS_EXAMPLES: &[Example] = &[
    Example {
        name: "Degree centrality (number of connections)",
        query: "MATCH (n:Person)
                OPTIONAL MATCH (n)-[r]-()
                RETURN n.name, count(r) AS degree
                ORDER BY degree DESC",
    },
    Example {
        name: "Find the most connected person",
        query: "MATCH (n:Person)
                OPTIONAL MATCH (n)-[r]-()
                WITH n, count(r) AS connections
                ORDER BY connections DESC
                LIMIT 1
                RETURN n.name, connections",
    },
    Example {
        name: "Find people working in technology companies",
        query: "MATCH (p:Person)-[:WORKS_FOR]->(c:Company)
                WHERE c.industry = 'Technology'
                RETURN p.name, c.name, c.industry
                ORDER BY p.name",
    },
    Example {
        name: "Find mutual friends",
        query: "MATCH (p1:Person)-[:FRIENDS_WITH]-(mutual:Person)-[:FRIENDS_WITH]-(p2:Person)
                WHERE p1 <> p2
                WITH p1, p2, collect(mutual.name) AS mutual_friends
                RETURN p1.name, p2.name, mutual_friends
                ORDER BY size(mutual_friends) DESC",
    },
];

/// Queries listed by the interactive shell's `help` command.
pub const HELP_QUERIES: &[&str] = &[
    "MATCH (n) RETURN n LIMIT 5",
    "MATCH (p:Person) RETURN p.name, p.age",
    "MATCH ()-[r]->() RETURN type(r), count(r)",
    "MATCH (n) RETURN labels(n), count(n)",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(SAMPLE_DATA.len(), 8);
        assert_eq!(QUERY_EXAMPLES.len(), 6);
        assert_eq!(ANALYSIS_EXAMPLES.len(), 4);
        assert_eq!(HELP_QUERIES.len(), 4);
    }

    #[test]
    fn test_example_names_are_unique() {
        let names: HashSet<&str> = QUERY_EXAMPLES
            .iter()
            .chain(ANALYSIS_EXAMPLES)
            .map(|example| example.name)
            .collect();
        assert_eq!(names.len(), QUERY_EXAMPLES.len() + ANALYSIS_EXAMPLES.len());
    }

    #[test]
    fn test_examples_are_read_only() {
        for example in QUERY_EXAMPLES.iter().chain(ANALYSIS_EXAMPLES) {
            let upper = example.query.to_uppercase();
            assert!(upper.contains("RETURN"), "{} has no RETURN", example.name);
            assert!(!upper.contains("CREATE"), "{} writes data", example.name);
            assert!(!upper.contains("DELETE"), "{} deletes data", example.name);
        }
    }
}
