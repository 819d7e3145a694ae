use thiserror::Error;

use crate::{EditError, RegistryError, ShapeError};

/// Unified error type covering shape validation, registry checks, edits,
/// JSON decoding, and I/O.
///
/// Returned by the loaders in [`load`](crate::load).
#[derive(Debug, Error)]
pub enum RuleTreeError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
