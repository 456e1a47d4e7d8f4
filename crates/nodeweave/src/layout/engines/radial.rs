//! Radial layout engine
//!
//! Places the root on the viewport center and every other node on a ring
//! whose radius grows with its breadth-first distance from the root. Nodes
//! the traversal never reaches share one extra ring outside the last level.
//!
//! The layout is fully determined by the edge list; the RNG is not used.

use std::{collections::VecDeque, f32::consts::TAU};

use indexmap::{IndexMap, IndexSet};
use log::debug;
use rand::RngCore;

use nodeweave_core::{
    geometry::Size,
    graph::{Graph, Layout, NodeId, PlacedNode},
};

use super::Engine;

const DEFAULT_RING_SPACING: f32 = 200.0;

/// Concentric rings around the root.
#[derive(Debug, Clone)]
pub struct RadialEngine {
    node_size: f32,
    root_scale: f32,
    ring_spacing: f32,
}

impl RadialEngine {
    pub fn new(node_size: f32, root_scale: f32) -> Self {
        Self {
            node_size,
            root_scale,
            ring_spacing: DEFAULT_RING_SPACING,
        }
    }

    /// Set the radial distance between consecutive rings
    pub fn set_ring_spacing(&mut self, spacing: f32) -> &mut Self {
        self.ring_spacing = spacing;
        self
    }

    pub fn ring_spacing(&self) -> f32 {
        self.ring_spacing
    }
}

/// Breadth-first level of every node reachable from `center`, following
/// edges from source to target.
fn levels(graph: &Graph, center: NodeId) -> IndexMap<NodeId, usize> {
    let mut children: IndexMap<NodeId, Vec<NodeId>> = IndexMap::new();
    for edge in graph.edges() {
        children
            .entry(edge.source())
            .or_default()
            .push(edge.target());
    }

    let mut levels = IndexMap::from([(center, 0)]);
    let mut queue = VecDeque::from([center]);
    while let Some(node) = queue.pop_front() {
        let level = levels[&node];
        for &child in children.get(&node).into_iter().flatten() {
            if !levels.contains_key(&child) {
                levels.insert(child, level + 1);
                queue.push_back(child);
            }
        }
    }
    levels
}

impl Engine for RadialEngine {
    fn calculate(&self, graph: &Graph, viewport: Size, _rng: &mut dyn RngCore) -> Layout {
        let ids = graph.node_ids();
        let Some(&first) = ids.first() else {
            return Layout::new();
        };

        let designated = graph.resolved_root();
        let center_id = designated.unwrap_or(first);
        let levels = levels(graph, center_id);
        let outer = levels.values().copied().max().unwrap_or(0) + 1;

        // Rings in first-appearance order, so sibling order follows the edge list.
        let mut rings: IndexMap<usize, IndexSet<NodeId>> = IndexMap::new();
        for &id in &ids {
            let level = levels.get(&id).copied().unwrap_or(outer);
            rings.entry(level).or_default().insert(id);
        }

        debug!(
            center:% = center_id,
            rings = rings.len(),
            unreachable = ids.len() - levels.len();
            "Placing nodes on rings"
        );

        let center = viewport.center();
        let mut layout = Layout::new();
        for (&level, members) in &rings {
            if level == 0 {
                let size = if designated.is_some() {
                    self.node_size * self.root_scale
                } else {
                    self.node_size
                };
                layout.insert(PlacedNode::new(center_id, center, size));
                continue;
            }

            let radius = level as f32 * self.ring_spacing;
            let step = TAU / members.len() as f32;
            for (index, &id) in members.iter().enumerate() {
                let position = center.polar_offset(radius, step * index as f32);
                layout.insert(PlacedNode::new(id, position, self.node_size));
            }
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn run(engine: &RadialEngine, graph: &Graph) -> Layout {
        engine.calculate(graph, Size::new(800.0, 600.0), &mut StdRng::seed_from_u64(0))
    }

    fn radius(layout: &Layout, id: u32) -> f32 {
        let center = Size::new(800.0, 600.0).center();
        layout.position(NodeId::new(id)).unwrap().distance(center)
    }

    #[test]
    fn test_empty_graph() {
        let layout = run(&RadialEngine::new(70.0, 2.0), &Graph::default());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_levels_on_rings() {
        let graph = Graph::from_pairs([(0, 1), (0, 2), (0, 3), (1, 4), (4, 5)])
            .with_root(NodeId::new(0));
        let layout = run(&RadialEngine::new(70.0, 2.0), &graph);

        assert_eq!(layout.len(), 6);
        assert_approx_eq!(f32, radius(&layout, 0), 0.0);
        assert_approx_eq!(f32, layout.get(NodeId::new(0)).unwrap().size(), 140.0);
        for id in [1, 2, 3] {
            assert_approx_eq!(f32, radius(&layout, id), 200.0, epsilon = 1e-3);
        }
        assert_approx_eq!(f32, radius(&layout, 4), 400.0, epsilon = 1e-3);
        assert_approx_eq!(f32, radius(&layout, 5), 600.0, epsilon = 1e-3);
    }

    #[test]
    fn test_first_child_at_zero_angle() {
        let graph = Graph::from_pairs([(0, 1), (0, 2)]).with_root(NodeId::new(0));
        let layout = run(&RadialEngine::new(70.0, 2.0), &graph);

        let first = layout.position(NodeId::new(1)).unwrap();
        assert_approx_eq!(f32, first.x(), 600.0, epsilon = 1e-3);
        assert_approx_eq!(f32, first.y(), 300.0, epsilon = 1e-3);

        let second = layout.position(NodeId::new(2)).unwrap();
        assert_approx_eq!(f32, second.x(), 200.0, epsilon = 1e-3);
        assert_approx_eq!(f32, second.y(), 300.0, epsilon = 1e-3);
    }

    #[test]
    fn test_unreachable_nodes_on_outer_ring() {
        // 3 -> 0 points into the root, so 3 is never reached from it.
        let graph = Graph::from_pairs([(0, 1), (3, 0), (7, 8)]).with_root(NodeId::new(0));
        let mut engine = RadialEngine::new(70.0, 2.0);
        engine.set_ring_spacing(100.0);
        let layout = run(&engine, &graph);

        assert_approx_eq!(f32, radius(&layout, 1), 100.0, epsilon = 1e-3);
        for id in [3, 7, 8] {
            assert_approx_eq!(f32, radius(&layout, id), 200.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_without_root_uses_first_id() {
        let graph = Graph::from_pairs([(5, 6), (6, 7)]);
        let layout = run(&RadialEngine::new(70.0, 2.0), &graph);

        assert_approx_eq!(f32, radius(&layout, 5), 0.0);
        assert_approx_eq!(f32, layout.get(NodeId::new(5)).unwrap().size(), 70.0);
        assert_approx_eq!(f32, radius(&layout, 7), 400.0, epsilon = 1e-3);
    }

    #[test]
    fn test_cycle_visits_each_node_once() {
        let graph = Graph::from_pairs([(0, 1), (1, 2), (2, 0), (2, 2)]).with_root(NodeId::new(0));
        let layout = run(&RadialEngine::new(70.0, 2.0), &graph);

        assert_eq!(layout.len(), 3);
        assert_approx_eq!(f32, radius(&layout, 2), 400.0, epsilon = 1e-3);
    }
}
