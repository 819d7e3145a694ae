use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::path::NodePath;
use super::rule::{Rule, RuleId};

/// A member of a rule tree: either a nested group or a leaf rule.
///
/// The JSON form carries no tag. Deserialization tries the group shape first
/// (`operatorIdentifier` + `children`) and falls back to the rule shape, the
/// same discrimination [`child_query_validator`](crate::child_query_validator)
/// applies to untyped values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node<V = Value> {
    RuleSet(RuleSet<V>),
    Rule(Rule<V>),
}

impl<V> Node<V> {
    #[must_use]
    pub fn as_rule(&self) -> Option<&Rule<V>> {
        match self {
            Node::Rule(rule) => Some(rule),
            Node::RuleSet(_) => None,
        }
    }

    #[must_use]
    pub fn as_rule_set(&self) -> Option<&RuleSet<V>> {
        match self {
            Node::RuleSet(group) => Some(group),
            Node::Rule(_) => None,
        }
    }

    #[must_use]
    pub fn is_rule(&self) -> bool {
        matches!(self, Node::Rule(_))
    }
}

impl<V> From<Rule<V>> for Node<V> {
    fn from(rule: Rule<V>) -> Self {
        Node::Rule(rule)
    }
}

impl<V> From<RuleSet<V>> for Node<V> {
    fn from(group: RuleSet<V>) -> Self {
        Node::RuleSet(group)
    }
}

impl<V> fmt::Display for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::RuleSet(group) => write!(f, "{group}"),
            Node::Rule(rule) => write!(f, "{rule}"),
        }
    }
}

/// The root of a rule tree. `None` means no query has been defined yet.
pub type Query<V = Value> = Option<RuleSet<V>>;

/// A group of rules and nested groups combined under one named operator.
///
/// The operator is a name only (for example `"AND"`); its meaning belongs to
/// whoever evaluates the query. Child order is significant and preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet<V = Value> {
    pub(crate) operator_identifier: String,
    pub(crate) children: Vec<Node<V>>,
}

impl<V> RuleSet<V> {
    /// An empty group.
    #[must_use]
    pub fn new(operator: impl Into<String>) -> Self {
        Self {
            operator_identifier: operator.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(operator: impl Into<String>, children: Vec<Node<V>>) -> Self {
        Self {
            operator_identifier: operator.into(),
            children,
        }
    }

    #[must_use]
    pub fn operator(&self) -> &str {
        &self.operator_identifier
    }

    #[must_use]
    pub fn children(&self) -> &[Node<V>] {
        &self.children
    }

    #[must_use]
    pub fn into_children(self) -> Vec<Node<V>> {
        self.children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first, pre-order traversal of every descendant (the root group
    /// itself is not yielded). Children are visited in order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_, V> {
        let mut stack = Vec::with_capacity(self.children.len());
        for (i, child) in self.children.iter().enumerate().rev() {
            stack.push((NodePath::root().child(i), child));
        }
        Walk { stack }
    }

    /// Number of leaf rules anywhere in the tree.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.walk().filter(|(_, node)| node.is_rule()).count()
    }

    /// Nesting depth counted in groups. The root alone has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.walk()
            .filter(|(_, node)| !node.is_rule())
            .map(|(path, _)| path.len() + 1)
            .max()
            .unwrap_or(1)
    }

    /// Locate a rule by its instance id.
    #[must_use]
    pub fn find_rule(&self, rule_id: &RuleId) -> Option<(NodePath, &Rule<V>)> {
        self.walk().find_map(|(path, node)| match node {
            Node::Rule(rule) if &rule.rule_id == rule_id => Some((path, rule)),
            _ => None,
        })
    }

    /// The group at `path`. The root path yields `self`; a path that runs
    /// through a rule or past the end of a `children` list yields `None`.
    #[must_use]
    pub fn group(&self, path: &NodePath) -> Option<&RuleSet<V>> {
        let mut current = self;
        for &idx in path.indices() {
            match current.children.get(idx)? {
                Node::RuleSet(group) => current = group,
                Node::Rule(_) => return None,
            }
        }
        Some(current)
    }

    /// The node at `path`. Returns `None` for the root path, which names the
    /// group itself rather than one of its children.
    #[must_use]
    pub fn node(&self, path: &NodePath) -> Option<&Node<V>> {
        let (&last, parents) = path.indices().split_last()?;
        self.group(&NodePath::from(parents))?.children.get(last)
    }

    /// The rule at `path`, if the path names a rule.
    #[must_use]
    pub fn rule(&self, path: &NodePath) -> Option<&Rule<V>> {
        self.node(path)?.as_rule()
    }
}

/// Iterator returned by [`RuleSet::walk`].
#[derive(Debug)]
pub struct Walk<'a, V> {
    stack: Vec<(NodePath, &'a Node<V>)>,
}

impl<'a, V> Iterator for Walk<'a, V> {
    type Item = (NodePath, &'a Node<V>);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        if let Node::RuleSet(group) = node {
            for (i, child) in group.children.iter().enumerate().rev() {
                self.stack.push((path.child(i), child));
            }
        }
        Some((path, node))
    }
}

impl<V> fmt::Display for RuleSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operator_identifier)?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}

/// Builder for constructing a [`RuleSet`] in code.
///
/// # Example
///
/// ```
/// use ruletree::RuleSetBuilder;
/// use serde_json::json;
///
/// let query = RuleSetBuilder::new("AND")
///     .rule("age", 1, json!(30))
///     .group("OR", |g| g.rule("country", 2, "NL").rule("country", 3, "BE"))
///     .build();
///
/// assert_eq!(query.rule_count(), 3);
/// assert_eq!(query.to_string(), "AND(age#1, OR(country#2, country#3))");
/// ```
#[derive(Debug)]
pub struct RuleSetBuilder<V = Value> {
    operator: String,
    children: Vec<Node<V>>,
}

impl RuleSetBuilder<Value> {
    /// Start a group whose rules carry JSON operands.
    #[must_use]
    pub fn new(operator: &str) -> Self {
        Self::typed(operator)
    }
}

impl<V> RuleSetBuilder<V> {
    /// Start a group whose rules carry operands of type `V`.
    #[must_use]
    pub fn typed(operator: &str) -> Self {
        Self {
            operator: operator.to_owned(),
            children: Vec::new(),
        }
    }

    /// Append a leaf rule.
    #[must_use]
    pub fn rule(mut self, identifier: &str, rule_id: impl Into<RuleId>, value: impl Into<V>) -> Self {
        self.children
            .push(Node::Rule(Rule::new(identifier, rule_id, value.into())));
        self
    }

    /// Append a nested group, populated by the closure.
    #[must_use]
    pub fn group(mut self, operator: &str, f: impl FnOnce(Self) -> Self) -> Self {
        let nested = f(Self::typed(operator));
        self.children.push(Node::RuleSet(nested.build()));
        self
    }

    /// Append an already constructed node.
    #[must_use]
    pub fn node(mut self, node: impl Into<Node<V>>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn build(self) -> RuleSet<V> {
        RuleSet {
            operator_identifier: self.operator,
            children: self.children,
        }
    }
}
