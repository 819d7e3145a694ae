use ruletree::{child_query_validator, query_validator, RuleSetBuilder};
use serde_json::json;

fn main() {
    // Build a query in code
    let query = RuleSetBuilder::new("AND")
        .rule("age", 1, 30)
        .group("OR", |g| g.rule("country", 2, "NL").rule("country", 3, "BE"))
        .build();

    println!("{query}");

    // Check untyped values the way a UI layer receives them
    let incoming = serde_json::to_value(&query).expect("query serializes");
    println!("valid query: {}", query_validator(&incoming));

    let dropped = json!({"identifier": "age", "ruleId": 4, "value": 18});
    println!("valid child: {}", child_query_validator(&dropped));
    println!("bare rule as query: {}", query_validator(&dropped));
}
