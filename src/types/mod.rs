mod config;
mod error;
mod path;
mod rule;
mod ruleset;

pub use config::{OperatorDefinition, QueryBuilderConfig, RuleDefinition};
pub use error::{EditError, RegistryError, ShapeError};
pub use path::NodePath;
pub use rule::{Rule, RuleId};
pub use ruleset::{Node, Query, RuleSet, RuleSetBuilder, Walk};
