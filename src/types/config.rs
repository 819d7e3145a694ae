use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::RegistryError;
use super::path::NodePath;
use super::rule::{Rule, RuleId};
use super::ruleset::{Node, RuleSet};

/// A combining operator a group may use, e.g. `{"identifier": "AND", "name": "All of"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorDefinition {
    pub identifier: String,
    pub name: String,
}

impl OperatorDefinition {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

/// A kind of rule a user may add.
///
/// `component` is an opaque reference to whatever renders the rule editor; it
/// is carried through untouched. `initial_value` seeds the operand of newly
/// added rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition<V = Value> {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub component: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<V>,
}

impl<V> RuleDefinition<V> {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            component: Value::Null,
            initial_value: None,
        }
    }

    #[must_use]
    pub fn with_initial_value(mut self, value: V) -> Self {
        self.initial_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_component(mut self, component: impl Into<Value>) -> Self {
        self.component = component.into();
        self
    }
}

/// The registry a query builder works against: the operators and rule kinds
/// on offer, plus presentation options.
///
/// `colors` are cycled through by group nesting depth. `dragging` holds the
/// reorder options of the UI layer and is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryBuilderConfig<V = Value> {
    pub operators: Vec<OperatorDefinition>,
    pub rules: Vec<RuleDefinition<V>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dragging: Option<Value>,
}

impl<V> QueryBuilderConfig<V> {
    #[must_use]
    pub fn new(operators: Vec<OperatorDefinition>, rules: Vec<RuleDefinition<V>>) -> Self {
        Self {
            operators,
            rules,
            colors: Vec::new(),
            dragging: None,
        }
    }

    #[must_use]
    pub fn with_colors<S: Into<String>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Check the registry itself: identifiers are non-empty and unique per
    /// kind.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] found.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for op in &self.operators {
            if op.identifier.is_empty() {
                return Err(RegistryError::EmptyIdentifier {
                    path: NodePath::root(),
                });
            }
            if !seen.insert(op.identifier.as_str()) {
                return Err(RegistryError::DuplicateOperator {
                    identifier: op.identifier.clone(),
                });
            }
        }
        seen.clear();
        for def in &self.rules {
            if def.identifier.is_empty() {
                return Err(RegistryError::EmptyIdentifier {
                    path: NodePath::root(),
                });
            }
            if !seen.insert(def.identifier.as_str()) {
                return Err(RegistryError::DuplicateRuleDefinition {
                    identifier: def.identifier.clone(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn operator(&self, identifier: &str) -> Option<&OperatorDefinition> {
        self.operators.iter().find(|op| op.identifier == identifier)
    }

    #[must_use]
    pub fn rule(&self, identifier: &str) -> Option<&RuleDefinition<V>> {
        self.rules.iter().find(|def| def.identifier == identifier)
    }

    /// Background color for a group at `depth` (root is 0), cycling through
    /// the configured colors.
    #[must_use]
    pub fn color_for_depth(&self, depth: usize) -> Option<&str> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[depth % self.colors.len()].as_str())
    }

    /// Check a query against this registry: every operator and rule
    /// identifier is non-empty and registered, and rule ids are unique across
    /// the whole tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] in pre-order.
    pub fn check_query(&self, query: &RuleSet<V>) -> Result<(), RegistryError> {
        self.check_query_inner(query).inspect_err(|err| {
            tracing::debug!(%err, "query rejected by registry");
        })
    }

    fn check_query_inner(&self, query: &RuleSet<V>) -> Result<(), RegistryError> {
        let operators: HashSet<&str> = self.operators.iter().map(|op| op.identifier.as_str()).collect();
        let rules: HashSet<&str> = self.rules.iter().map(|def| def.identifier.as_str()).collect();

        check_operator(&operators, NodePath::root(), query.operator())?;

        let mut rule_ids = HashSet::new();
        for (path, node) in query.walk() {
            match node {
                Node::RuleSet(group) => check_operator(&operators, path, group.operator())?,
                Node::Rule(rule) => {
                    if rule.identifier.is_empty() {
                        return Err(RegistryError::EmptyIdentifier { path });
                    }
                    if !rules.contains(rule.identifier.as_str()) {
                        return Err(RegistryError::UnknownRule {
                            path,
                            identifier: rule.identifier.clone(),
                        });
                    }
                    if !rule_ids.insert(&rule.rule_id) {
                        return Err(RegistryError::DuplicateRuleId {
                            path,
                            rule_id: rule.rule_id.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl<V: Clone + Default> QueryBuilderConfig<V> {
    /// Instantiate a new rule of the given kind, seeded with the definition's
    /// initial value (or `V::default()` when it has none).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UndefinedRuleDefinition`] if no rule
    /// definition has that identifier.
    pub fn new_rule(
        &self,
        identifier: &str,
        rule_id: impl Into<RuleId>,
    ) -> Result<Rule<V>, RegistryError> {
        let def = self
            .rule(identifier)
            .ok_or_else(|| RegistryError::UndefinedRuleDefinition {
                identifier: identifier.to_owned(),
            })?;
        let value = def.initial_value.clone().unwrap_or_default();
        Ok(Rule::new(identifier, rule_id, value))
    }
}

fn check_operator(
    operators: &HashSet<&str>,
    path: NodePath,
    operator: &str,
) -> Result<(), RegistryError> {
    if operator.is_empty() {
        return Err(RegistryError::EmptyIdentifier { path });
    }
    if !operators.contains(operator) {
        return Err(RegistryError::UnknownOperator {
            path,
            operator: operator.to_owned(),
        });
    }
    Ok(())
}
