//! Entry-point validators built on the shallow [guards](crate::guards), plus a
//! deep variant that applies them to every descendant.

use serde_json::Value;

use crate::guards::{is_query_builder_config, is_rule, is_rule_set};
use crate::types::{NodePath, ShapeError};

/// Accept a whole query: `null` (nothing defined yet) or a rule set.
///
/// A bare rule is not a valid root.
#[must_use]
pub fn query_validator(query: &Value) -> bool {
    query.is_null() || is_rule_set(query)
}

/// Accept any single tree member, leaf or group. Used before inserting a node
/// into an existing tree.
#[must_use]
pub fn child_query_validator(query: &Value) -> bool {
    is_rule(query) || is_rule_set(query)
}

/// Accept a builder configuration (operator and rule registries).
#[must_use]
pub fn config_validator(param: &Value) -> bool {
    is_query_builder_config(param)
}

/// Check that `value` is a rule set and that every descendant is a rule or a
/// rule set, all the way down.
///
/// # Errors
///
/// Returns [`ShapeError::NotARuleSet`] if the root is not a rule set, or
/// [`ShapeError::InvalidNode`] for the first malformed descendant in
/// depth-first order.
pub fn validate_tree(value: &Value) -> Result<(), ShapeError> {
    if !is_rule_set(value) {
        return Err(ShapeError::NotARuleSet {
            path: NodePath::root(),
        });
    }

    let mut stack = vec![(NodePath::root(), value)];
    while let Some((path, node)) = stack.pop() {
        if is_rule_set(node) {
            if let Some(Value::Array(children)) = node.get("children") {
                for (i, child) in children.iter().enumerate().rev() {
                    stack.push((path.child(i), child));
                }
            }
        } else if !is_rule(node) {
            return Err(ShapeError::InvalidNode { path });
        }
    }
    Ok(())
}

/// Deep counterpart of [`query_validator`].
///
/// # Errors
///
/// Returns [`ShapeError::InvalidQueryRoot`] if `query` is neither `null` nor a
/// rule set, otherwise whatever [`validate_tree`] reports.
pub fn validate_query(query: &Value) -> Result<(), ShapeError> {
    if query.is_null() {
        return Ok(());
    }
    if !is_rule_set(query) {
        return Err(ShapeError::InvalidQueryRoot);
    }
    validate_tree(query)
}

/// Deep counterpart of [`child_query_validator`]: a rule, or a rule set whose
/// whole subtree is well formed.
///
/// # Errors
///
/// Returns [`ShapeError::InvalidNode`] at the root if `value` is neither shape.
pub fn validate_child(value: &Value) -> Result<(), ShapeError> {
    if is_rule_set(value) {
        return validate_tree(value);
    }
    if is_rule(value) {
        return Ok(());
    }
    Err(ShapeError::InvalidNode {
        path: NodePath::root(),
    })
}

/// Like [`config_validator`], but names the missing field.
///
/// # Errors
///
/// Returns [`ShapeError::InvalidConfig`].
pub fn validate_config(param: &Value) -> Result<(), ShapeError> {
    for field in ["operators", "rules"] {
        if !matches!(param.get(field), Some(Value::Array(_))) {
            return Err(ShapeError::InvalidConfig { field });
        }
    }
    Ok(())
}

/// Boolean form of [`validate_tree`].
#[must_use]
pub fn is_valid_tree(value: &Value) -> bool {
    validate_tree(value).is_ok()
}

/// Boolean form of [`validate_query`].
#[must_use]
pub fn is_valid_query(query: &Value) -> bool {
    validate_query(query).is_ok()
}
