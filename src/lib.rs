//! Typed rule trees for visual query builders.
//!
//! A query is either nothing (`null`) or a [`RuleSet`]: a group of [`Rule`]s
//! and nested groups combined under a named operator. The [`guards`] and
//! [`validators`] decide whether untyped JSON has that shape; [`load`] turns
//! validated JSON into the typed model, which can then be edited in place and
//! checked against a [`QueryBuilderConfig`] registry.

mod edit;
mod error;
pub mod guards;
pub mod load;
mod types;
pub mod validators;

pub use error::RuleTreeError;
pub use guards::{is_query_builder_config, is_rule, is_rule_set};
pub use types::{
    EditError, Node, NodePath, OperatorDefinition, Query, QueryBuilderConfig, RegistryError,
    Rule, RuleDefinition, RuleId, RuleSet, RuleSetBuilder, ShapeError, Walk,
};
pub use validators::{
    child_query_validator, config_validator, is_valid_query, is_valid_tree, query_validator,
    validate_child, validate_config, validate_query, validate_tree,
};
