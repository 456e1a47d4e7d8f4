//! Random layout engine
//!
//! Places every node uniformly at random inside the viewport. A resolved root
//! is put on the center instead, at its scaled size.

use log::debug;
use rand::RngCore;

use nodeweave_core::{
    geometry::Size,
    graph::{Graph, Layout, PlacedNode},
};

use super::{Engine, random_point};

/// Uniform random placement, no simulation.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    node_size: f32,
    root_scale: f32,
}

impl RandomEngine {
    pub fn new(node_size: f32, root_scale: f32) -> Self {
        Self {
            node_size,
            root_scale,
        }
    }
}

impl Engine for RandomEngine {
    fn calculate(&self, graph: &Graph, viewport: Size, rng: &mut dyn RngCore) -> Layout {
        let root = graph.resolved_root();
        debug!(node_count = graph.node_ids().len(); "Placing nodes at random");

        graph
            .node_ids()
            .into_iter()
            .map(|id| {
                // Draw for the root too, so its presence does not shift the
                // sequence seen by other nodes.
                let position = random_point(rng, viewport);
                if root == Some(id) {
                    PlacedNode::new(id, viewport.center(), self.node_size * self.root_scale)
                } else {
                    PlacedNode::new(id, position, self.node_size)
                }
            })
            .collect()
    }
}
