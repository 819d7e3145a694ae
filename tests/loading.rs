use std::io::Write;

use ruletree::load::{config_from_file, query_from_file, query_to_json};
use ruletree::{
    EditError, NodePath, Query, QueryBuilderConfig, RegistryError, RuleTreeError, ShapeError,
};
use serde_json::json;

const CONFIG: &str = r##"{
    "operators": [
        {"identifier": "AND", "name": "All of"},
        {"identifier": "OR", "name": "Any of"}
    ],
    "rules": [
        {"identifier": "age", "name": "Age", "component": "number-input", "initialValue": 18},
        {"identifier": "country", "name": "Country", "component": "select"}
    ],
    "colors": ["#f5f5f5", "#e0e0e0"]
}"##;

const QUERY: &str = r#"{
    "operatorIdentifier": "AND",
    "children": [
        {"identifier": "age", "ruleId": 1, "value": 21},
        {"operatorIdentifier": "OR", "children": [
            {"identifier": "country", "ruleId": "c-1", "value": "NL"},
            {"identifier": "country", "ruleId": "c-2", "value": "BE"}
        ]}
    ]
}"#;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_config_and_query_from_files() {
    let config_file = write_temp(CONFIG);
    let query_file = write_temp(QUERY);

    let config: QueryBuilderConfig = config_from_file(config_file.path()).unwrap();
    let query: Query = query_from_file(query_file.path()).unwrap();
    let query = query.unwrap();

    assert_eq!(config.check_query(&query), Ok(()));
    assert_eq!(query.rule_count(), 3);
    assert_eq!(config.color_for_depth(query.depth() - 1), Some("#e0e0e0"));
}

#[test]
fn add_rule_from_definition_then_save() {
    let config: QueryBuilderConfig = ruletree::load::config_from_json(CONFIG).unwrap();
    let mut query: Query = ruletree::load::query_from_json(QUERY).unwrap();
    let tree = query.as_mut().unwrap();

    let rule = config.new_rule("age", 2).unwrap();
    let path = tree.add_rule(&NodePath::from([1]), rule).unwrap();
    assert_eq!(path, NodePath::from([1, 2]));
    assert_eq!(tree.rule(&path).unwrap().value, json!(18));
    assert_eq!(config.check_query(tree), Ok(()));

    let saved = query_to_json(&query).unwrap();
    let reloaded: Query = ruletree::load::query_from_json(&saved).unwrap();
    assert_eq!(reloaded, query);
}

#[test]
fn null_file_is_empty_query() {
    let file = write_temp("null");
    let query: Query = query_from_file(file.path()).unwrap();
    assert!(query.is_none());
}

#[test]
fn malformed_file_rejected_with_path() {
    let file = write_temp(
        r#"{"operatorIdentifier": "AND", "children": [
            {"identifier": "age", "ruleId": 1, "value": 21, "note": "extra"}
        ]}"#,
    );
    let err = query_from_file::<serde_json::Value>(file.path()).unwrap_err();
    assert!(matches!(
        err,
        RuleTreeError::Shape(ShapeError::InvalidNode { ref path }) if *path == NodePath::from([0])
    ));
    assert_eq!(
        err.to_string(),
        "node at $.children[0] is neither a rule nor a rule set"
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = query_from_file::<serde_json::Value>(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, RuleTreeError::Io(_)));
}

fn drop_node(query: &mut Query, path: &NodePath) -> Result<(), RuleTreeError> {
    if let Some(tree) = query.as_mut() {
        tree.remove(path)?;
    }
    Ok(())
}

fn add_from_definition(
    config: &QueryBuilderConfig,
    query: &mut Query,
    identifier: &str,
) -> Result<NodePath, RuleTreeError> {
    let rule = config.new_rule(identifier, 99)?;
    let tree = query.as_mut().ok_or(EditError::PathNotFound {
        path: NodePath::root(),
    })?;
    Ok(tree.add_rule(&NodePath::root(), rule)?)
}

#[test]
fn edit_and_registry_errors_propagate_into_umbrella() {
    let config: QueryBuilderConfig = ruletree::load::config_from_json(CONFIG).unwrap();
    let mut query: Query = ruletree::load::query_from_json(QUERY).unwrap();
    let before = query.clone();

    let err = drop_node(&mut query, &NodePath::root()).unwrap_err();
    assert!(matches!(err, RuleTreeError::Edit(EditError::CannotRemoveRoot)));
    let err = drop_node(&mut query, &NodePath::from([7])).unwrap_err();
    assert!(matches!(
        err,
        RuleTreeError::Edit(EditError::PathNotFound { ref path }) if *path == NodePath::from([7])
    ));
    assert_eq!(query, before);

    let err = add_from_definition(&config, &mut query, "height").unwrap_err();
    assert!(matches!(err, RuleTreeError::Registry(RegistryError::UndefinedRuleDefinition { .. })));
    let path = add_from_definition(&config, &mut query, "country").unwrap();
    assert_eq!(path, NodePath::from([2]));
}
