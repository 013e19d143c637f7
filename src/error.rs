//! Error types for scaffold queries.

use thiserror::Error;

use crate::model::{ElementId, NodeId};

/// Result type for scaffold query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur during scaffold queries.
///
/// Absent anatomical landmarks (no trunk, no markers) are recoverable and
/// yield well-defined empty results rather than errors; these variants cover
/// evaluation on inputs the caller already confirmed valid, which indicates a
/// malformed model or a programming error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError {
    /// The named group does not exist in the model.
    #[error("group '{name}' not found")]
    GroupNotFound {
        /// The missing group name.
        name: String,
    },

    /// A geometry query was asked to evaluate a group with no 3-D elements.
    #[error("group '{name}' has no 3-D elements")]
    EmptyGroup {
        /// The empty group name.
        name: String,
    },

    /// A required field does not exist in the model.
    #[error("field '{name}' not found")]
    FieldNotFound {
        /// The missing field name.
        name: String,
    },

    /// A field could not be evaluated at a parametric element location.
    #[error("field evaluation failed in group '{name}' at element {element}")]
    EvaluationFailed {
        /// The group whose element was being evaluated.
        name: String,
        /// The element the evaluation failed at.
        element: ElementId,
    },

    /// The root derivative of a branch has zero length, so no unit direction
    /// exists.
    #[error("branch '{name}' has a zero-length root derivative")]
    DegenerateDirection {
        /// The branch group name.
        name: String,
    },

    /// A per-marker field could not be evaluated at a marker point.
    #[error("marker field '{name}' could not be evaluated at node {node}")]
    MarkerEvaluationFailed {
        /// The marker field name.
        name: String,
        /// The marker node the evaluation failed at.
        node: NodeId,
    },
}
