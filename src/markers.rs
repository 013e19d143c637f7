//! Level-marker extraction.
//!
//! Vagus scaffolds carry a set of zero-dimensional level markers down the
//! trunk (anatomical landmarks such as the level of the laryngeal
//! prominence). Each marker stores its name, its mesh location, and its
//! vagus-space coordinates; an optional host coordinate field can be
//! resampled at the stored location through a temporary embedded evaluator.

use nalgebra::Point3;
use tracing::warn;

use crate::error::{QueryError, QueryResult};
use crate::model::{ElementId, Group, HostEvaluator, NodeSet, ScaffoldModel};

/// Name of the group collecting the level marker points.
pub const MARKER_GROUP_NAME: &str = "marker";

/// Per-marker field names, as stored in the scaffold.
const MARKER_NAME_FIELD: &str = "marker_name";
const MARKER_LOCATION_FIELD: &str = "marker_location";
const MARKER_VAGUS_COORDINATES_FIELD: &str = "marker vagus coordinates";

/// Stored mesh location of a marker point.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLocation {
    /// Identifier of the element the marker lies in.
    pub element: ElementId,
    /// Parametric coordinates within the element, always 3 components
    /// regardless of the underlying element dimensionality.
    pub xi: [f64; 3],
}

/// One level marker, in point-set order down the trunk.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRecord {
    /// Marker name.
    pub name: String,
    /// Stored mesh location.
    pub location: MarkerLocation,
    /// Intrinsic vagus-space coordinates of the marker.
    pub vagus_coordinates: Point3<f64>,
    /// Host coordinates resampled at the stored location, when a host field
    /// was supplied.
    pub host_coordinates: Option<Point3<f64>>,
}

/// Get the list of vagus level markers, in point-set order from top to
/// bottom.
///
/// For each marker point: its name, its stored mesh location (element plus 3
/// parametric components), its vagus coordinates, and, when `host_field` is
/// supplied, the host field evaluated at the stored location through a
/// temporary embedded evaluator. That evaluator and the change batch
/// wrapping the read loop are both scoped strictly to this call; nothing
/// outlives it.
///
/// An absent or empty marker group yields an empty list (logged, non-fatal).
///
/// # Errors
///
/// - [`QueryError::FieldNotFound`] if markers exist but one of the required
///   per-marker fields does not.
/// - [`QueryError::MarkerEvaluationFailed`] if a per-marker field cannot be
///   evaluated at one of the marker points.
pub fn extract_markers<M: ScaffoldModel>(
    model: &M,
    host_field: Option<&M::Field>,
) -> QueryResult<Vec<MarkerRecord>> {
    let Some(marker_group) = model.find_group(MARKER_GROUP_NAME) else {
        warn!("no level markers");
        return Ok(Vec::new());
    };
    let marker_nodes = marker_group.node_set();
    if marker_nodes.is_empty() {
        warn!("no level markers");
        return Ok(Vec::new());
    }

    let find = |name: &str| {
        model.find_field(name).ok_or_else(|| QueryError::FieldNotFound {
            name: name.to_string(),
        })
    };
    let name_field = find(MARKER_NAME_FIELD)?;
    let location_field = find(MARKER_LOCATION_FIELD)?;
    let vagus_field = find(MARKER_VAGUS_COORDINATES_FIELD)?;

    // Many individual reads follow; batch them so the collaborator does not
    // recompute incrementally after each one.
    let _batch = model.begin_change_batch();
    let host = host_field.map(|field| model.embed(field, &location_field));

    let mut records = Vec::with_capacity(marker_nodes.len());
    for node in marker_nodes.nodes() {
        let failed = |field: &str| QueryError::MarkerEvaluationFailed {
            name: field.to_string(),
            node,
        };
        let name = model
            .evaluate_string(&name_field, node)
            .ok_or_else(|| failed(MARKER_NAME_FIELD))?;
        let (element, xi) = model
            .evaluate_mesh_location(&location_field, node)
            .ok_or_else(|| failed(MARKER_LOCATION_FIELD))?;
        let vagus_coordinates = model
            .evaluate_at_node(&vagus_field, node)
            .ok_or_else(|| failed(MARKER_VAGUS_COORDINATES_FIELD))?;
        let host_coordinates = match &host {
            Some(evaluator) => Some(
                evaluator
                    .evaluate(node)
                    .ok_or_else(|| failed(MARKER_LOCATION_FIELD))?,
            ),
            None => None,
        };
        records.push(MarkerRecord {
            name,
            location: MarkerLocation { element, xi },
            vagus_coordinates,
            host_coordinates,
        });
    }
    // Release the embedded evaluator inside the batch so its teardown
    // notifies no other consumer.
    drop(host);
    Ok(records)
}
