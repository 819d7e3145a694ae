//! Shallow shape predicates over untyped JSON values.
//!
//! Each guard inspects only the value it is given: field presence and coarse
//! type (string, integer, array). Nested children and registry entries are
//! never looked at, so every check is O(1) in the size of the tree.

use serde_json::Value;

const RULE_FIELDS: [&str; 3] = ["identifier", "ruleId", "value"];

/// Whether `value` has the shape of a [`Rule`](crate::Rule).
///
/// The value must be an object with exactly three keys: a string
/// `identifier`, a `ruleId` that is a string or an integer (representable as
/// `i64`), and a `value` of any shape, `null` included.
#[must_use]
pub fn is_rule(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    if obj.len() != RULE_FIELDS.len() || !RULE_FIELDS.iter().all(|k| obj.contains_key(*k)) {
        return false;
    }
    obj["identifier"].is_string() && is_rule_id(&obj["ruleId"])
}

/// Whether `value` has the shape of a [`RuleSet`](crate::RuleSet).
///
/// Only checks for a string `operatorIdentifier` and an array `children`.
/// The children themselves are not inspected; use
/// [`validate_tree`](crate::validate_tree) for that.
#[must_use]
pub fn is_rule_set(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    matches!(obj.get("operatorIdentifier"), Some(Value::String(_)))
        && matches!(obj.get("children"), Some(Value::Array(_)))
}

/// Whether `value` has the shape of a
/// [`QueryBuilderConfig`](crate::QueryBuilderConfig): an object with an array
/// `operators` and an array `rules`.
#[must_use]
pub fn is_query_builder_config(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    matches!(obj.get("operators"), Some(Value::Array(_)))
        && matches!(obj.get("rules"), Some(Value::Array(_)))
}

fn is_rule_id(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Number(n) => n.is_i64(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rule_with_string_and_int_ids() {
        assert!(is_rule(&json!({"identifier": "age", "ruleId": 1, "value": 30})));
        assert!(is_rule(&json!({"identifier": "age", "ruleId": "r-1", "value": 30})));
        assert!(is_rule(&json!({"identifier": "age", "ruleId": -7, "value": 30})));
    }

    #[test]
    fn rule_value_may_be_null_or_nested() {
        assert!(is_rule(&json!({"identifier": "x", "ruleId": 1, "value": null})));
        assert!(is_rule(
            &json!({"identifier": "x", "ruleId": 1, "value": {"operatorIdentifier": "AND", "children": []}})
        ));
    }

    #[test]
    fn rule_missing_field() {
        assert!(!is_rule(&json!({"identifier": "age", "ruleId": 1})));
        assert!(!is_rule(&json!({"identifier": "age", "value": 1})));
        assert!(!is_rule(&json!({"ruleId": 1, "value": 1})));
    }

    #[test]
    fn rule_extra_field() {
        assert!(!is_rule(
            &json!({"identifier": "age", "ruleId": 1, "value": 30, "extra": true})
        ));
    }

    #[test]
    fn rule_wrong_types() {
        assert!(!is_rule(&json!({"identifier": 5, "ruleId": 1, "value": 30})));
        assert!(!is_rule(&json!({"identifier": "age", "ruleId": 1.5, "value": 30})));
        assert!(!is_rule(&json!({"identifier": "age", "ruleId": null, "value": 30})));
        assert!(!is_rule(&json!({"identifier": "age", "ruleId": [1], "value": 30})));
    }

    #[test]
    fn rule_id_beyond_i64_rejected() {
        assert!(!is_rule(
            &json!({"identifier": "age", "ruleId": u64::MAX, "value": 30})
        ));
    }

    #[test]
    fn non_objects_are_never_rules() {
        for v in [json!(null), json!(42), json!("age"), json!([]), json!(true)] {
            assert!(!is_rule(&v), "{v} accepted as rule");
        }
    }

    #[test]
    fn rule_set_is_shallow() {
        assert!(is_rule_set(&json!({"operatorIdentifier": "AND", "children": []})));
        assert!(is_rule_set(
            &json!({"operatorIdentifier": "AND", "children": [42, null, "junk"]})
        ));
    }

    #[test]
    fn rule_set_allows_extra_fields() {
        assert!(is_rule_set(
            &json!({"operatorIdentifier": "AND", "children": [], "collapsed": true})
        ));
    }

    #[test]
    fn rule_set_wrong_types() {
        assert!(!is_rule_set(&json!({"operatorIdentifier": 1, "children": []})));
        assert!(!is_rule_set(&json!({"operatorIdentifier": "AND", "children": {}})));
        assert!(!is_rule_set(&json!({"operatorIdentifier": "AND"})));
        assert!(!is_rule_set(&json!({"children": []})));
        assert!(!is_rule_set(&json!(null)));
    }

    #[test]
    fn config_shape() {
        assert!(is_query_builder_config(&json!({"operators": [], "rules": []})));
        assert!(is_query_builder_config(
            &json!({"operators": [], "rules": [], "colors": ["red"]})
        ));
        assert!(!is_query_builder_config(&json!({"operators": []})));
        assert!(!is_query_builder_config(&json!({"operators": {}, "rules": []})));
        assert!(!is_query_builder_config(&json!([])));
    }
}
