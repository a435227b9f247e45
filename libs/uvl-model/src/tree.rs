//! # Feature Model
//!
//! The internal feature model: an arena of features, an arena of tree nodes
//! referencing them, and the collected constraint formulas. Nodes and
//! features carry stable integer ids (indices into the arenas) so that
//! traversal caches can be indexed by id instead of relying on reference
//! identity.

use crate::feature::Feature;
use crate::formula::Formula;
use crate::range::Cardinality;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable id of a feature within one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureId(usize);

/// Stable id of a tree node within one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Index for id-keyed caches sized with [`FeatureModel::node_count`].
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A set of sibling children under one parent, constrained by a cardinality
/// range over how many of them may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub range: Cardinality,
}

impl Group {
    pub fn new(range: Cardinality) -> Self {
        Self { range }
    }

    /// Children are individually mandatory or optional: `[0, unbounded)`.
    pub fn is_and(&self) -> bool {
        self.range.lower() == 0 && self.range.upper().is_none()
    }

    /// At least one child: `[1, unbounded)`.
    pub fn is_or(&self) -> bool {
        self.range.lower() == 1 && self.range.upper().is_none()
    }

    /// Exactly one child: `[1, 1]`.
    pub fn is_alternative(&self) -> bool {
        self.range.lower() == 1 && self.range.upper() == Some(1)
    }

    /// An explicit `[lower, upper]` group that is none of the above.
    pub fn is_cardinality(&self) -> bool {
        !self.is_and() && !self.is_or() && !self.is_alternative()
    }
}

/// One position of a feature in the tree.
///
/// The node records which of its parent's groups it belongs to, its own
/// instance range (mandatory = lower bound at least 1) and the groups
/// constraining its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    feature: FeatureId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Index into the parent's group list.
    group_id: usize,
    feature_range: Option<Cardinality>,
    groups: Vec<Group>,
}

impl TreeNode {
    pub fn feature(&self) -> FeatureId {
        self.feature
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn group_id(&self) -> usize {
        self.group_id
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn feature_range(&self) -> Option<Cardinality> {
        self.feature_range
    }

    /// A node is mandatory when its instance range requires at least one.
    pub fn is_mandatory(&self) -> bool {
        self.feature_range
            .map_or(false, |range| range.lower() >= 1)
    }

    pub fn is_optional(&self) -> bool {
        self.feature_range
            .map_or(false, |range| range.lower() == 0)
    }

    pub fn set_mandatory(&mut self) {
        self.feature_range = Some(Cardinality::exactly(1));
    }

    pub fn set_optional(&mut self) {
        self.feature_range = Some(Cardinality::of(0, 1));
    }

    pub fn set_feature_range(&mut self, range: Cardinality) {
        self.feature_range = Some(range);
    }
}

/// A feature model: features, their tree positions, and constraints.
///
/// The tree is acyclic with a single parent per node; feature names are
/// unique within one model. Several independent roots are representable,
/// although serialization only honors the first.
#[derive(Debug, Clone, Default)]
pub struct FeatureModel {
    features: Vec<Feature>,
    by_name: HashMap<String, FeatureId>,
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
    constraints: Vec<Formula>,
}

impl FeatureModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature; the name must be unique within this model.
    ///
    /// Returns the duplicate name on conflict.
    pub fn add_feature(&mut self, feature: Feature) -> Result<FeatureId, String> {
        if self.by_name.contains_key(&feature.name) {
            return Err(feature.name);
        }
        let id = FeatureId(self.features.len());
        self.by_name.insert(feature.name.clone(), id);
        self.features.push(feature);
        Ok(id)
    }

    pub fn feature(&self, id: FeatureId) -> &Feature {
        &self.features[id.0]
    }

    pub fn feature_id(&self, name: &str) -> Option<FeatureId> {
        self.by_name.get(name).copied()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Plants a feature as a new independent root.
    pub fn add_root(&mut self, feature: FeatureId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            feature,
            parent: None,
            children: Vec::new(),
            group_id: 0,
            feature_range: None,
            groups: Vec::new(),
        });
        self.roots.push(id);
        id
    }

    /// Attaches a feature below `parent` as a member of `group_id`.
    pub fn add_child(&mut self, parent: NodeId, feature: FeatureId, group_id: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            feature,
            parent: Some(parent),
            children: Vec::new(),
            group_id,
            feature_range: None,
            groups: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Appends a group to `node` and returns its index.
    pub fn add_group(&mut self, node: NodeId, group: Group) -> usize {
        let groups = &mut self.nodes[node.0].groups;
        groups.push(group);
        groups.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of `node` that belong to group `group_id`, in tree order.
    pub fn group_children(&self, node: NodeId, group_id: usize) -> Vec<NodeId> {
        self.nodes[node.0]
            .children
            .iter()
            .copied()
            .filter(|child| self.nodes[child.0].group_id == group_id)
            .collect()
    }

    pub fn add_constraint(&mut self, constraint: Formula) {
        self.constraints.push(constraint);
    }

    pub fn constraints(&self) -> &[Formula] {
        &self.constraints
    }
}
