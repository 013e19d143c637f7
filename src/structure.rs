//! Branching-structure reconstruction.
//!
//! A scaffold stores no explicit topology: which branch descends from which
//! is encoded geometrically, by each branch's first element starting on
//! nodes that belong to its parent's node set. [`build_structure_maps`]
//! reconstructs the parent/child tree and the common-name/variant map from
//! that containment relation alone.

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::classify::NameClassifier;
use crate::model::{ElementSet, Group, NodeSet, ScaffoldModel, VOLUME_DIMENSION};

/// Name of the coordinate field required for structure reconstruction and
/// branch geometry.
pub const COORDINATES_FIELD_NAME: &str = "coordinates";

/// One entry of the [`StructureMap`]: a trunk or single-branch group with its
/// resolved parent and ordered children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureEntry {
    parent: Option<String>,
    children: Vec<String>,
}

impl StructureEntry {
    /// Get the parent group name, or `None` for the trunk and for orphan
    /// branches whose start node matched no known node set.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Get the child branch group names, in discovery order.
    #[must_use]
    pub fn children(&self) -> &[String] {
        &self.children
    }
}

/// Ordered-insertion mapping from trunk/branch group name to its
/// [`StructureEntry`].
///
/// Iteration follows insertion order: the trunk first, then branch
/// candidates in model enumeration order. Entries are created by
/// [`build_structure_maps`]; callers only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureMap {
    order: Vec<String>,
    entries: HashMap<String, StructureEntry>,
}

impl StructureMap {
    /// Create an empty structure map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry with no parent and no children.
    pub(crate) fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.entries.insert(name.clone(), StructureEntry::default()).is_none() {
            self.order.push(name);
        }
    }

    /// Record `parent` as the parent of `child`, appending `child` to the
    /// parent's children list.
    pub(crate) fn set_parent(&mut self, child: &str, parent: &str) {
        if let Some(entry) = self.entries.get_mut(child) {
            entry.parent = Some(parent.to_string());
        }
        if let Some(entry) = self.entries.get_mut(parent) {
            entry.children.push(child.to_string());
        }
    }

    /// Get an entry by group name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StructureEntry> {
        self.entries.get(name)
    }

    /// Check if a group name has an entry.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get the trunk group name (the first seeded entry), or `None` if the
    /// map is empty.
    #[must_use]
    pub fn trunk(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    /// Iterate over group names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Iterate over `(name, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StructureEntry)> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|entry| (name.as_str(), entry)))
    }
}

/// Ordered-insertion mapping from common branch name to its lettered variant
/// group names.
///
/// Keys appear in first-seen order over the model's group enumeration, and
/// each variant list preserves discovery order. Common names are aggregation
/// placeholders: no key of this map is ever a [`StructureMap`] key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonGroupMap {
    order: Vec<String>,
    variants: HashMap<String, Vec<String>>,
}

impl CommonGroupMap {
    /// Create an empty common-group map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variant group name under its common name.
    pub(crate) fn add_variant(&mut self, common: &str, variant: impl Into<String>) {
        match self.variants.get_mut(common) {
            Some(list) => list.push(variant.into()),
            None => {
                self.order.push(common.to_string());
                self.variants.insert(common.to_string(), vec![variant.into()]);
            }
        }
    }

    /// Get the variant group names for a common name, in discovery order.
    #[must_use]
    pub fn get(&self, common: &str) -> Option<&[String]> {
        self.variants.get(common).map(Vec::as_slice)
    }

    /// Check if a common name has an entry.
    #[must_use]
    pub fn contains(&self, common: &str) -> bool {
        self.variants.contains_key(common)
    }

    /// Get the number of common names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over `(common name, variants)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order.iter().filter_map(|name| {
            self.variants
                .get(name)
                .map(|list| (name.as_str(), list.as_slice()))
        })
    }
}

/// Find the group containing the trunk part of the model.
///
/// Tries the classifier's side candidates in order (by default
/// `"left vagus nerve"` then `"right vagus nerve"`) and returns the first
/// that exists, or `None`.
pub fn find_trunk_group<'m, M: ScaffoldModel>(
    model: &'m M,
    classifier: &NameClassifier,
) -> Option<&'m M::Group> {
    classifier
        .trunk_name_candidates()
        .find_map(|name| model.find_group(&name))
}

/// Reconstruct the branching structure of the nerve.
///
/// Returns two maps:
///
/// 1. [`StructureMap`]: every trunk/single-branch group name mapped to its
///    parent group name (or `None`) and ordered child group names.
/// 2. [`CommonGroupMap`]: every common branch name mapped to its lettered
///    variant group names.
///
/// Branch candidates are the enumerated groups that match a branch keyword,
/// are not common-group placeholders, are not trunk annotations, and have at
/// least one 3-D element. Each candidate's parent is the first node set,
/// searched trunk first then candidates in discovery order, containing the node at
/// local position 1 of the candidate's first 3-D element, which is the node
/// the branch start is geometrically glued to. A candidate whose start node
/// matches no known node set stays rootless and joins no children list.
///
/// If no trunk candidate resolves, or the `"coordinates"` field is missing,
/// both maps are returned empty (logged, non-fatal).
pub fn build_structure_maps<M: ScaffoldModel>(
    model: &M,
    classifier: &NameClassifier,
) -> (StructureMap, CommonGroupMap) {
    // Variant names reduce to a common name; collect them over every group
    // before filtering so placeholder groups can be excluded below.
    let mut common_map = CommonGroupMap::new();
    for group in model.groups() {
        if let Some(common) = classifier.common_name(group.name()) {
            common_map.add_variant(&common, group.name());
        }
    }

    let trunk_group = find_trunk_group(model, classifier);
    let coordinates = model.find_field(COORDINATES_FIELD_NAME);
    let (Some(trunk_group), Some(coordinates)) = (trunk_group, coordinates) else {
        warn!("missing vagus trunk group or coordinates field, returning empty structure maps");
        return (StructureMap::new(), CommonGroupMap::new());
    };

    let trunk_name = trunk_group.name().to_string();
    let mut structure_map = StructureMap::new();
    structure_map.insert(trunk_name.clone());
    // Search order for parent resolution: trunk first, then candidates in
    // discovery order.
    let mut node_sets: Vec<(String, <M::Group as Group>::Nodes)> =
        vec![(trunk_name, trunk_group.node_set())];

    let mut branch_candidates: Vec<&M::Group> = Vec::new();
    for group in model.groups() {
        let name = group.name();
        if common_map.contains(name) {
            continue;
        }
        if classifier.is_trunk(name) {
            continue;
        }
        if !classifier.is_branch_candidate(name) {
            continue;
        }
        if group.element_set(VOLUME_DIMENSION).is_empty() {
            continue;
        }
        branch_candidates.push(group);
        node_sets.push((name.to_string(), group.node_set()));
        structure_map.insert(name);
    }
    debug!(
        candidates = branch_candidates.len(),
        common_groups = common_map.len(),
        "classified scaffold groups"
    );

    for group in &branch_candidates {
        let name = group.name();
        // The first element of a branch starts on nodes in the parent
        // branch; the node at local position 1 identifies the parent.
        let Some(element) = group.element_set(VOLUME_DIMENSION).first() else {
            continue;
        };
        let Some(start_node) = model.local_node(element, &coordinates, 1) else {
            debug!(group = name, "branch start node unavailable, leaving rootless");
            continue;
        };
        for (compare_name, compare_nodes) in &node_sets {
            if compare_name == name {
                continue;
            }
            if compare_nodes.contains(start_node) {
                structure_map.set_parent(name, compare_name);
                break;
            }
        }
    }

    (structure_map, common_map)
}
