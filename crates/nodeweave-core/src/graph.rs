//! Graph model shared by the layout engines and the renderer.
//!
//! # Overview
//!
//! - [`NodeId`] - Non-negative integer node identifier
//! - [`Edge`] - A directed `source → target` pair of node ids
//! - [`Graph`] - An edge list plus an optional designated root node
//! - [`PlacedNode`] - The final position and diameter of one node
//! - [`Layout`] - The result of a layout run, keyed by node id
//!
//! Nodes are never declared on their own: the set of nodes of a [`Graph`] is
//! exactly the set of ids that appear as an endpoint of at least one edge.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

use crate::geometry::{Bounds, Point, Size};

/// Identifier of a graph node.
///
/// # Examples
///
/// ```
/// # use nodeweave_core::graph::NodeId;
/// let id = NodeId::new(13);
/// assert_eq!(id.index(), 13);
/// assert_eq!(id.to_string(), "13");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value of this id
    pub fn index(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed edge between two nodes.
///
/// Self-loops and duplicate edges are legal; layout engines tolerate both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn source(self) -> NodeId {
        self.source
    }

    pub fn target(self) -> NodeId {
        self.target
    }

    /// Returns true if both endpoints are the same node
    pub fn is_self_loop(self) -> bool {
        self.source == self.target
    }
}

impl From<(u32, u32)> for Edge {
    fn from((source, target): (u32, u32)) -> Self {
        Self::new(source, target)
    }
}

/// An edge list with an optional designated root node.
///
/// # Examples
///
/// ```
/// # use nodeweave_core::graph::{Graph, NodeId};
/// let graph = Graph::from_pairs([(0, 1), (0, 2), (2, 1)]).with_root(NodeId::new(0));
///
/// let ids: Vec<u32> = graph.node_ids().iter().map(|id| id.index()).collect();
/// assert_eq!(ids, vec![0, 1, 2]);
/// assert_eq!(graph.root(), Some(NodeId::new(0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    edges: Vec<Edge>,
    root: Option<NodeId>,
}

impl Graph {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges, root: None }
    }

    /// Builds a graph from `(source, target)` pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self::new(pairs.into_iter().map(Edge::from).collect())
    }

    /// Sets the designated root node
    pub fn with_root(mut self, root: NodeId) -> Self {
        self.root = Some(root);
        self
    }

    pub fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns true if the graph has no edges (and therefore no nodes)
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every distinct node id touched by the edge list, in first-appearance
    /// order (an edge's source is visited before its target).
    pub fn node_ids(&self) -> IndexSet<NodeId> {
        self.edges
            .iter()
            .flat_map(|edge| [edge.source, edge.target])
            .collect()
    }

    /// Returns true if some edge references the given id
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.source == id || edge.target == id)
    }

    /// Returns the root if it is set and referenced by at least one edge
    pub fn resolved_root(&self) -> Option<NodeId> {
        self.root.filter(|&root| self.contains_node(root))
    }
}

/// Final position and diameter of a node after layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedNode {
    id: NodeId,
    position: Point,
    size: f32,
}

impl PlacedNode {
    pub fn new(id: NodeId, position: Point, size: f32) -> Self {
        Self { id, position, size }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Center of the node
    pub fn position(&self) -> Point {
        self.position
    }

    /// Diameter of the node
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Axis-aligned box enclosing the node's circle
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(Size::new(self.size, self.size))
    }
}

/// Result of a layout run: one [`PlacedNode`] per distinct node id.
///
/// Iteration follows the order in which nodes were inserted, which for the
/// bundled engines is first-appearance order in the edge list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    nodes: IndexMap<NodeId, PlacedNode>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for the node's id
    pub fn insert(&mut self, node: PlacedNode) {
        self.nodes.insert(node.id, node);
    }

    pub fn get(&self, id: NodeId) -> Option<&PlacedNode> {
        self.nodes.get(&id)
    }

    /// Shortcut for the position of a node
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.get(id).map(PlacedNode::position)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedNode> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Smallest box containing every node's circle, or `None` for an empty layout
    pub fn bounds(&self) -> Option<Bounds> {
        self.iter()
            .map(PlacedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Moves every node by the same offset
    pub fn translate(&mut self, offset: Point) {
        for node in self.nodes.values_mut() {
            node.position = node.position.add_point(offset);
        }
    }
}

impl FromIterator<PlacedNode> for Layout {
    fn from_iter<T: IntoIterator<Item = PlacedNode>>(iter: T) -> Self {
        let mut layout = Layout::new();
        for node in iter {
            layout.insert(node);
        }
        layout
    }
}
