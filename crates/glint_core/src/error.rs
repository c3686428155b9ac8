//! Visual tree error types

use thiserror::Error;

use crate::tree::ElementId;

/// Errors raised by visual tree mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The element is not (or no longer) part of the tree
    #[error("Unknown element: {0:?}")]
    UnknownElement(ElementId),
}

/// Result type for visual tree operations
pub type Result<T> = std::result::Result<T, TreeError>;
