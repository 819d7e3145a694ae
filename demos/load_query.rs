use ruletree::load::{config_from_json, query_from_json};
use ruletree::{Query, QueryBuilderConfig};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"{
    "operators": [{"identifier": "AND", "name": "All"}, {"identifier": "OR", "name": "Any"}],
    "rules": [{"identifier": "age", "name": "Age", "initialValue": 18}]
}"#;

const QUERY: &str = r#"{
    "operatorIdentifier": "AND",
    "children": [
        {"identifier": "age", "ruleId": 1, "value": 30},
        {"operatorIdentifier": "XOR", "children": []}
    ]
}"#;

const BROKEN: &str = r#"{
    "operatorIdentifier": "AND",
    "children": [{"identifier": "age", "ruleId": 1.5, "value": 30}]
}"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let config: QueryBuilderConfig = config_from_json(CONFIG).expect("config is valid");

    let query: Query = query_from_json(QUERY).expect("query is well formed");
    if let Some(tree) = &query {
        println!("loaded {tree}");
        match config.check_query(tree) {
            Ok(()) => println!("query matches the registry"),
            Err(err) => println!("registry check failed: {err}"),
        }
    }

    match query_from_json::<serde_json::Value>(BROKEN) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(err) => println!("rejected: {err}"),
    }
}
