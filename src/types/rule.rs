use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a rule instance within a tree.
///
/// Serialized untagged, so it reads and writes either a JSON string or a JSON
/// integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleId {
    Int(i64),
    Str(String),
}

impl From<i64> for RuleId {
    fn from(v: i64) -> Self {
        RuleId::Int(v)
    }
}

impl From<i32> for RuleId {
    fn from(v: i32) -> Self {
        RuleId::Int(i64::from(v))
    }
}

impl From<&str> for RuleId {
    fn from(v: &str) -> Self {
        RuleId::Str(v.to_owned())
    }
}

impl From<String> for RuleId {
    fn from(v: String) -> Self {
        RuleId::Str(v)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleId::Int(v) => write!(f, "{v}"),
            RuleId::Str(v) => write!(f, "\"{v}\""),
        }
    }
}

/// A leaf condition: which rule definition applies, the instance id, and the
/// operand value.
///
/// The operand type `V` is chosen by the caller; the tree never inspects it.
/// With the default `serde_json::Value` any JSON operand is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Rule<V = serde_json::Value> {
    pub identifier: String,
    pub rule_id: RuleId,
    pub value: V,
}

impl<V> Rule<V> {
    pub fn new(identifier: impl Into<String>, rule_id: impl Into<RuleId>, value: V) -> Self {
        Self {
            identifier: identifier.into(),
            rule_id: rule_id.into(),
            value,
        }
    }
}

impl<V> fmt::Display for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.identifier, self.rule_id)
    }
}
