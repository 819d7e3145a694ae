//! Loading queries and configurations from JSON.
//!
//! Input is first gated by the shape validators, so malformed trees are
//! reported as [`ShapeError`](crate::ShapeError) with the offending path
//! instead of a generic decoding failure. Only operand payloads that do not
//! fit `V` surface as [`RuleTreeError::Json`].

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::RuleTreeError;
use crate::types::{Node, Query, QueryBuilderConfig};
use crate::validators::{validate_child, validate_config, validate_query};

/// Convert an untyped value into a typed query. `null` yields `None`.
///
/// # Errors
///
/// [`RuleTreeError::Shape`] if the value is not a well-formed query tree,
/// [`RuleTreeError::Json`] if an operand does not decode as `V`.
pub fn query_from_value<V: DeserializeOwned>(value: Value) -> Result<Query<V>, RuleTreeError> {
    validate_query(&value).inspect_err(|err| {
        tracing::debug!(%err, "rejected query");
    })?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Parse JSON text into a typed query.
///
/// # Errors
///
/// As for [`query_from_value`], plus [`RuleTreeError::Json`] for invalid JSON.
pub fn query_from_json<V: DeserializeOwned>(input: &str) -> Result<Query<V>, RuleTreeError> {
    query_from_value(serde_json::from_str(input)?)
}

/// Read a JSON file into a typed query.
///
/// # Errors
///
/// As for [`query_from_json`], plus [`RuleTreeError::Io`].
pub fn query_from_file<V: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<Query<V>, RuleTreeError> {
    let input = std::fs::read_to_string(path)?;
    query_from_json(&input)
}

/// Convert an untyped value into a single tree member, for insertion into an
/// existing tree. Group members are validated all the way down.
///
/// # Errors
///
/// [`RuleTreeError::Shape`] or [`RuleTreeError::Json`].
pub fn child_from_value<V: DeserializeOwned>(value: Value) -> Result<Node<V>, RuleTreeError> {
    validate_child(&value).inspect_err(|err| {
        tracing::debug!(%err, "rejected child node");
    })?;
    Ok(serde_json::from_value(value)?)
}

/// Convert an untyped value into a builder configuration and check the
/// registry for empty or duplicate identifiers.
///
/// # Errors
///
/// [`RuleTreeError::Shape`], [`RuleTreeError::Json`] or
/// [`RuleTreeError::Registry`].
pub fn config_from_value<V: DeserializeOwned>(
    value: Value,
) -> Result<QueryBuilderConfig<V>, RuleTreeError> {
    validate_config(&value).inspect_err(|err| {
        tracing::debug!(%err, "rejected config");
    })?;
    let config: QueryBuilderConfig<V> = serde_json::from_value(value)?;
    config.validate()?;
    tracing::debug!(
        operators = config.operators.len(),
        rules = config.rules.len(),
        "loaded query builder config"
    );
    Ok(config)
}

/// Parse JSON text into a builder configuration.
///
/// # Errors
///
/// As for [`config_from_value`], plus [`RuleTreeError::Json`] for invalid JSON.
pub fn config_from_json<V: DeserializeOwned>(
    input: &str,
) -> Result<QueryBuilderConfig<V>, RuleTreeError> {
    config_from_value(serde_json::from_str(input)?)
}

/// Read a JSON file into a builder configuration.
///
/// # Errors
///
/// As for [`config_from_json`], plus [`RuleTreeError::Io`].
pub fn config_from_file<V: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<QueryBuilderConfig<V>, RuleTreeError> {
    let input = std::fs::read_to_string(path)?;
    config_from_json(&input)
}

/// Render a query in its JSON shape; `None` becomes `null`.
///
/// # Errors
///
/// [`RuleTreeError::Json`] if an operand fails to serialize.
pub fn query_to_value<V: Serialize>(query: &Query<V>) -> Result<Value, RuleTreeError> {
    Ok(serde_json::to_value(query)?)
}

/// Render a query as pretty-printed JSON text.
///
/// # Errors
///
/// [`RuleTreeError::Json`] if an operand fails to serialize.
pub fn query_to_json<V: Serialize>(query: &Query<V>) -> Result<String, RuleTreeError> {
    Ok(serde_json::to_string_pretty(query)?)
}
