use thiserror::Error;

use super::path::NodePath;
use super::rule::RuleId;

/// Why an untyped value is not a well-formed query tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("query root must be null or a rule set")]
    InvalidQueryRoot,

    #[error("expected a rule set at {path}")]
    NotARuleSet { path: NodePath },

    #[error("node at {path} is neither a rule nor a rule set")]
    InvalidNode { path: NodePath },

    #[error("query builder config is missing array field '{field}'")]
    InvalidConfig { field: &'static str },
}

/// A query or configuration that is well-shaped but disagrees with the
/// operator/rule registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("empty identifier at {path}")]
    EmptyIdentifier { path: NodePath },

    #[error("unknown operator '{operator}' at {path}")]
    UnknownOperator { path: NodePath, operator: String },

    #[error("unknown rule '{identifier}' at {path}")]
    UnknownRule { path: NodePath, identifier: String },

    #[error("duplicate rule id {rule_id} at {path}")]
    DuplicateRuleId { path: NodePath, rule_id: RuleId },

    #[error("duplicate operator definition '{identifier}'")]
    DuplicateOperator { identifier: String },

    #[error("duplicate rule definition '{identifier}'")]
    DuplicateRuleDefinition { identifier: String },

    #[error("no rule definition named '{identifier}'")]
    UndefinedRuleDefinition { identifier: String },
}

/// A tree edit that could not be applied. The tree is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no node at {path}")]
    PathNotFound { path: NodePath },

    #[error("node at {path} is not a rule set")]
    NotAGroup { path: NodePath },

    #[error("node at {path} is not a rule")]
    NotARule { path: NodePath },

    #[error("position {position} out of bounds for {path} with {len} children")]
    PositionOutOfBounds {
        path: NodePath,
        position: usize,
        len: usize,
    },

    #[error("the root rule set cannot be removed")]
    CannotRemoveRoot,

    #[error("cannot move {from} into its own subtree at {to}")]
    MoveIntoSelf { from: NodePath, to: NodePath },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_node_message() {
        let err = ShapeError::InvalidNode {
            path: NodePath::from([0, 3]),
        };
        assert_eq!(
            err.to_string(),
            "node at $.children[0].children[3] is neither a rule nor a rule set"
        );
    }

    #[test]
    fn invalid_config_message() {
        let err = ShapeError::InvalidConfig { field: "rules" };
        assert_eq!(
            err.to_string(),
            "query builder config is missing array field 'rules'"
        );
    }

    #[test]
    fn unknown_operator_message() {
        let err = RegistryError::UnknownOperator {
            path: NodePath::root(),
            operator: "XOR".into(),
        };
        assert_eq!(err.to_string(), "unknown operator 'XOR' at $");
    }

    #[test]
    fn duplicate_rule_id_message() {
        let err = RegistryError::DuplicateRuleId {
            path: NodePath::from([2]),
            rule_id: RuleId::from("r1"),
        };
        assert_eq!(err.to_string(), "duplicate rule id \"r1\" at $.children[2]");
    }

    #[test]
    fn position_out_of_bounds_message() {
        let err = EditError::PositionOutOfBounds {
            path: NodePath::from([1]),
            position: 5,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "position 5 out of bounds for $.children[1] with 2 children"
        );
    }

    #[test]
    fn move_into_self_message() {
        let err = EditError::MoveIntoSelf {
            from: NodePath::from([1]),
            to: NodePath::from([1, 0]),
        };
        assert_eq!(
            err.to_string(),
            "cannot move $.children[1] into its own subtree at $.children[1].children[0]"
        );
    }
}
