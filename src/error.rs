use thiserror::Error;

/// Errors returned by fallible tree queries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The query needs at least one element, but the tree is empty.
    #[error("tree is empty")]
    Empty,
}
