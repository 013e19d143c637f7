//! Collaborator interface to the external mesh/field provider.
//!
//! This crate does not own a mesh representation. Everything it reads (named
//! groups, node and element sets, field values and derivatives, marker point
//! data) comes through the [`ScaffoldModel`] trait family, implemented
//! by the hosting application over its own finite-element library. The model
//! is treated as an immutable snapshot for the duration of a query; none of
//! the query operations mutate it.
//!
//! Determinism of query output rests entirely on the enumeration orders the
//! implementation provides: group enumeration order, ascending element and
//! node iteration, and marker point-set order must be stable across calls on
//! an unchanged model.

use std::fmt;

use nalgebra::{Point3, Vector3};

/// Topological dimension of trunk and branch volume elements.
pub(crate) const VOLUME_DIMENSION: usize = 3;

/// Identifier of a global node in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an element in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of nodes belonging to a group.
pub trait NodeSet {
    /// Check whether the set contains a node.
    fn contains(&self, node: NodeId) -> bool;

    /// Get the number of nodes in the set.
    fn len(&self) -> usize;

    /// Check if the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the nodes in ascending identifier order.
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_;
}

/// A set of elements of one topological dimension belonging to a group.
pub trait ElementSet {
    /// Get the number of elements in the set.
    fn len(&self) -> usize;

    /// Check if the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the elements in ascending identifier order.
    fn elements(&self) -> impl Iterator<Item = ElementId> + '_;

    /// Get the lowest-identifier element, or `None` if the set is empty.
    fn first(&self) -> Option<ElementId> {
        self.elements().next()
    }
}

/// A named spatial region of the model.
///
/// Groups are supplied by the collaborator and are read-only here. A group
/// hands out fresh set handles; the handles stay valid for the duration of
/// the query call that obtained them.
pub trait Group {
    /// Node-set handle type.
    type Nodes: NodeSet;
    /// Element-set handle type.
    type Elements: ElementSet;

    /// Get the group name.
    fn name(&self) -> &str;

    /// Get the group's node set.
    fn node_set(&self) -> Self::Nodes;

    /// Get the group's element set of the given topological dimension.
    fn element_set(&self, dimension: usize) -> Self::Elements;
}

/// A derived evaluator that reads a host field at the mesh location stored in
/// a marker's location field ("embedding" composition).
///
/// The evaluator is a temporary: dropping it must tear it down without
/// emitting change notifications to other model consumers.
pub trait HostEvaluator {
    /// Evaluate the composed host coordinates at a marker node.
    ///
    /// Returns `None` if the location or the host field cannot be evaluated
    /// at that node.
    fn evaluate(&self, node: NodeId) -> Option<Point3<f64>>;
}

/// The mesh/field provider consumed by all scaffold queries.
pub trait ScaffoldModel {
    /// Named group handle type.
    type Group: Group;
    /// Opaque field handle type.
    type Field: Clone;
    /// Scoped derived evaluator for host-coordinate resampling, released on
    /// drop.
    type HostEvaluator<'a>: HostEvaluator
    where
        Self: 'a;
    /// Scoped change-batching guard, released on drop.
    type ChangeBatch<'a>
    where
        Self: 'a;

    /// Enumerate all named groups in the model's deterministic order.
    fn groups(&self) -> impl Iterator<Item = &Self::Group> + '_;

    /// Find a group by exact name.
    fn find_group(&self, name: &str) -> Option<&Self::Group>;

    /// Find a field by exact name.
    fn find_field(&self, name: &str) -> Option<Self::Field>;

    /// Get the global node occupying 1-based local node `index` of `element`
    /// under `field`'s interpolation scheme.
    ///
    /// Returns `None` if the element does not exist or has no such local
    /// node.
    fn local_node(&self, element: ElementId, field: &Self::Field, index: usize)
        -> Option<NodeId>;

    /// Evaluate a 3-component field at a parametric location within an
    /// element.
    fn evaluate(&self, field: &Self::Field, element: ElementId, xi: [f64; 3])
        -> Option<Point3<f64>>;

    /// Evaluate a field's derivative with respect to the 1-based local
    /// parametric `axis` at a location within an element.
    fn evaluate_derivative(
        &self,
        field: &Self::Field,
        element: ElementId,
        xi: [f64; 3],
        axis: usize,
    ) -> Option<Vector3<f64>>;

    /// Evaluate a string-valued field at a node.
    fn evaluate_string(&self, field: &Self::Field, node: NodeId) -> Option<String>;

    /// Evaluate a mesh-location field at a node.
    ///
    /// The parametric coordinates are always returned with exactly 3
    /// components; implementations zero-pad when the underlying element
    /// scheme has fewer.
    fn evaluate_mesh_location(
        &self,
        field: &Self::Field,
        node: NodeId,
    ) -> Option<(ElementId, [f64; 3])>;

    /// Evaluate a 3-component field at a node.
    fn evaluate_at_node(&self, field: &Self::Field, node: NodeId) -> Option<Point3<f64>>;

    /// Construct a derived evaluator composing `host` with the mesh location
    /// stored in `location`.
    ///
    /// The returned guard is scoped to the borrow of `self`; dropping it
    /// releases the derived evaluator without notifying other consumers.
    fn embed(&self, host: &Self::Field, location: &Self::Field) -> Self::HostEvaluator<'_>;

    /// Begin a scoped change batch suspending incremental recomputation while
    /// the guard is alive.
    ///
    /// Purely a performance hook for loops of many individual reads; it has
    /// no observable effect on results.
    fn begin_change_batch(&self) -> Self::ChangeBatch<'_>;
}
