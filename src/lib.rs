//! Structure and geometry queries for subject-specific vagus nerve scaffolds.
//!
//! A vagus scaffold is an anatomically annotated finite-element model: one
//! trunk per body side plus named branches, some of which come in lettered
//! variants (A, B, C...). No explicit topology is stored in the model; this
//! crate reconstructs it from naming conventions and spatial containment, and
//! extracts ordered geometric summaries for downstream analysis.
//!
//! # Overview
//!
//! The crate is organized around four query operations:
//!
//! - [`NameClassifier`] - trunk/branch/variant classification by name pattern
//! - [`build_structure_maps`] - parent/child tree and common-variant map,
//!   inferred from node containment
//! - [`evaluate_branch_roots`] - branch root position and unit direction
//! - [`extract_markers`] - ordered level-marker records down the trunk
//!
//! All four are stateless pure reads over a caller-supplied model. The mesh
//! and field representation is out of scope: it is consumed through the
//! [`ScaffoldModel`] trait family and never built or mutated here.
//!
//! # Example
//!
//! ```
//! use vagus_query::NameClassifier;
//!
//! let classifier = NameClassifier::default();
//! assert!(classifier.is_trunk("left vagus nerve"));
//! assert!(!classifier.is_trunk("left superior laryngeal branch of vagus nerve"));
//!
//! let common = classifier.common_name("left A thoracic cardiopulmonary branch of vagus nerve");
//! assert_eq!(
//!     common.as_deref(),
//!     Some("left thoracic cardiopulmonary branch of vagus nerve"),
//! );
//! ```
//!
//! # Determinism
//!
//! Output ordering follows the model's enumeration orders (group enumeration,
//! element iteration, marker point iteration). Two calls on an unchanged
//! model produce identical results, including list ordering.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod classify;
mod error;
mod geometry;
mod markers;
mod model;
mod structure;


pub use classify::NameClassifier;
pub use error::{QueryError, QueryResult};
pub use geometry::{evaluate_branch_roots, BranchGeometry, BRANCH_ROOT_XI};
pub use markers::{extract_markers, MarkerLocation, MarkerRecord, MARKER_GROUP_NAME};
pub use model::{
    ElementId, ElementSet, Group, HostEvaluator, NodeId, NodeSet, ScaffoldModel,
};
pub use structure::{
    build_structure_maps, find_trunk_group, CommonGroupMap, StructureEntry, StructureMap,
    COORDINATES_FIELD_NAME,
};

// Re-export for convenience
pub use nalgebra::{Point3, Vector3};
