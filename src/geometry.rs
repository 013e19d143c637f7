//! Branch-root geometry evaluation.

use nalgebra::{Point3, Vector3};

use crate::error::{QueryError, QueryResult};
use crate::model::{ElementSet, Group, ScaffoldModel, VOLUME_DIMENSION};

/// Parametric location of the centre of a branch cross-section at its
/// proximal end: local axis 1 runs along the branch, axes 2 and 3 span the
/// cross-section.
pub const BRANCH_ROOT_XI: [f64; 3] = [0.0, 0.5, 0.5];

/// Root position and unit direction of one branch.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchGeometry {
    /// Branch group name.
    pub name: String,
    /// Coordinates of the centre of the branch cross-section at its root.
    pub position: Point3<f64>,
    /// Unit direction of the branch at its root.
    pub direction: Vector3<f64>,
}

/// Evaluate the root coordinates and unit direction of the listed branches.
///
/// Produces one [`BranchGeometry`] per input name, in input order. Each
/// branch is evaluated on its lowest-identifier 3-D element at
/// [`BRANCH_ROOT_XI`]: the coordinate field value gives the position, and its
/// derivative with respect to local axis 1, normalized, gives the direction.
///
/// Callers are expected to pass names already confirmed against the
/// structure map, so failures here are surfaced rather than silently
/// defaulted.
///
/// # Errors
///
/// - [`QueryError::GroupNotFound`] if a name resolves to no group.
/// - [`QueryError::EmptyGroup`] if a group has no 3-D elements.
/// - [`QueryError::EvaluationFailed`] if the coordinate field cannot be
///   evaluated on the selected element.
/// - [`QueryError::DegenerateDirection`] if the root derivative has zero
///   length.
pub fn evaluate_branch_roots<M: ScaffoldModel>(
    model: &M,
    coordinates: &M::Field,
    branch_names: impl IntoIterator<Item = impl Into<String>>,
) -> QueryResult<Vec<BranchGeometry>> {
    let mut results = Vec::new();
    for name in branch_names {
        let name = name.into();
        let group = model
            .find_group(&name)
            .ok_or_else(|| QueryError::GroupNotFound { name: name.clone() })?;
        let element = group
            .element_set(VOLUME_DIMENSION)
            .first()
            .ok_or_else(|| QueryError::EmptyGroup { name: name.clone() })?;
        let position = model
            .evaluate(coordinates, element, BRANCH_ROOT_XI)
            .ok_or_else(|| QueryError::EvaluationFailed {
                name: name.clone(),
                element,
            })?;
        let derivative = model
            .evaluate_derivative(coordinates, element, BRANCH_ROOT_XI, 1)
            .ok_or_else(|| QueryError::EvaluationFailed {
                name: name.clone(),
                element,
            })?;
        let direction = derivative
            .try_normalize(0.0)
            .ok_or_else(|| QueryError::DegenerateDirection { name: name.clone() })?;
        results.push(BranchGeometry {
            name,
            position,
            direction,
        });
    }
    Ok(results)
}
