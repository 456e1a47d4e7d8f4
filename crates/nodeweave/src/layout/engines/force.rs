//! Force-directed layout engine
//!
//! This module implements a spring-embedder: every pair of nodes repels,
//! every edge acts as a spring with a rest length, velocities are damped and
//! integrated for a fixed number of iterations.
//!
//! One iteration runs, in order:
//!
//! 1. **Repulsion** over every ordered pair `(a, b)` of distinct nodes, with
//!    `d = |a - b| + epsilon`:
//!    - overlap correction when `d` is below the sum of the radii, pushing
//!      `a` away from `b` and `b` away from `a`;
//!    - long-range repulsion `repulsion_strength / d²` applied to `a` only.
//!      The reaction on `b` comes from visiting `(b, a)` in the same pass.
//! 2. **Springs** along every edge: `(d - ideal_length) * spring_strength`
//!    pulls the endpoints together when stretched and apart when compressed.
//!    Edges of zero length (self-loops, coincident nodes) are skipped.
//! 3. **Integration**: velocity is multiplied by `damping`, then added to the
//!    position.
//!
//! When the graph designates a root, it starts on the viewport center at
//! `root_scale` times the node size, moves freely during the simulation and
//! is brought back to the center by a rigid shift of the whole layout once
//! the iterations are done.

use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexSet;
use log::{debug, trace, warn};
use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use serde::Deserialize;

use nodeweave_core::{
    geometry::{Point, Size},
    graph::{Graph, Layout, NodeId, PlacedNode},
};

use super::{Engine, random_point};

/// Tuning parameters of the force simulation.
///
/// Every field has a default, so configuration files only need to name the
/// values they change.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForceParams {
    /// Number of simulation steps; there is no convergence test.
    pub iterations: usize,
    /// Numerator of the `1 / d²` pairwise repulsion.
    pub repulsion_strength: f32,
    /// Spring constant of the edge attraction.
    pub spring_strength: f32,
    /// Edge length at which the spring force vanishes.
    pub ideal_length: f32,
    /// Per-step velocity multiplier.
    pub damping: f32,
    /// Added to pairwise distances so coincident nodes never divide by zero.
    pub epsilon: f32,
    /// Fraction of the overlap depth applied as corrective push.
    pub overlap_factor: f32,
    /// Diameter of a regular node.
    pub node_size: f32,
    /// Diameter multiplier of the root node.
    pub root_scale: f32,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            iterations: 1000,
            repulsion_strength: 3000.0,
            spring_strength: 0.01,
            ideal_length: 100.0,
            damping: 0.9,
            epsilon: 0.01,
            overlap_factor: 0.5,
            node_size: 70.0,
            root_scale: 2.0,
        }
    }
}

impl ForceParams {
    /// Checks that the parameters describe a simulation that stays finite
    /// and gives every node a positive size.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending parameter.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.node_size.is_finite() && self.node_size > 0.0) {
            return Err("node_size must be a positive number");
        }
        if !(self.root_scale.is_finite() && self.root_scale > 0.0) {
            return Err("root_scale must be a positive number");
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err("damping must be between 0 and 1");
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err("epsilon must be a positive number");
        }
        let strengths = [
            self.repulsion_strength,
            self.spring_strength,
            self.ideal_length,
            self.overlap_factor,
        ];
        if !strengths.iter().all(|value| value.is_finite()) {
            return Err("force strengths must be finite numbers");
        }
        Ok(())
    }
}

/// Mutable per-node simulation state.
#[derive(Debug, Clone, Copy)]
struct Body {
    position: Point,
    velocity: Point,
    size: f32,
}

/// A force simulation over one graph.
///
/// Bodies live in a dense vector; `ids` maps each node id to its index in
/// that vector, so sparse ids cost nothing and lookups stay O(1). Edges are
/// resolved to index pairs once, up front.
///
/// Most callers want [`layout`] or [`ForceEngine`]; the simulation is public
/// for callers that need to stop early or inspect energy between steps.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: ForceParams,
    viewport: Size,
    ids: IndexSet<NodeId>,
    bodies: Vec<Body>,
    springs: Vec<(usize, usize)>,
    root: Option<usize>,
    steps: usize,
}

impl Simulation {
    /// Seeds one body per distinct node id at a uniform random position
    /// inside the viewport, with zero velocity.
    ///
    /// `params` must pass [`ForceParams::validate`]; debug builds assert it.
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        viewport: Size,
        params: ForceParams,
        rng: &mut R,
    ) -> Self {
        debug_assert!(
            params.validate().is_ok(),
            "invalid force parameters: {params:?}"
        );
        let ids = graph.node_ids();
        let mut bodies: Vec<Body> = ids
            .iter()
            .map(|_| Body {
                position: random_point(rng, viewport),
                velocity: Point::default(),
                size: params.node_size,
            })
            .collect();

        let springs = graph
            .edges()
            .iter()
            .filter_map(|edge| {
                let source = ids.get_index_of(&edge.source());
                let target = ids.get_index_of(&edge.target());
                if source.is_none() || target.is_none() {
                    warn!(
                        source:% = edge.source(),
                        target:% = edge.target();
                        "Skipping edge with unresolved endpoint"
                    );
                }
                source.zip(target)
            })
            .collect();

        let root = graph.root().and_then(|root| {
            let index = ids.get_index_of(&root);
            if index.is_none() {
                warn!(root:% = root; "Root node is not referenced by any edge, ignoring it");
            }
            index
        });
        if let Some(index) = root {
            let body = &mut bodies[index];
            body.position = viewport.center();
            body.size *= params.root_scale;
        }

        Self {
            params,
            viewport,
            ids,
            bodies,
            springs,
            root,
            steps: 0,
        }
    }

    /// Number of bodies in the simulation
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of steps performed so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Current position of a node, if it is part of the simulation
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.ids
            .get_index_of(&id)
            .map(|index| self.bodies[index].position)
    }

    /// Sum of squared speeds, half of the kinetic energy with unit masses
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies
            .iter()
            .map(|body| {
                let v = body.velocity;
                v.x() * v.x() + v.y() * v.y()
            })
            .sum()
    }

    /// Advance the simulation by one iteration
    pub fn step(&mut self) {
        self.apply_repulsion();
        self.apply_springs();
        self.integrate();
        self.steps += 1;
    }

    /// Run `iterations` steps
    pub fn run(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.step();
            self.trace_progress();
        }
    }

    /// Run up to `iterations` steps, checking `cancel` before each one.
    ///
    /// Returns the number of steps actually performed.
    pub fn run_until(&mut self, iterations: usize, cancel: &AtomicBool) -> usize {
        let start = self.steps;
        for _ in 0..iterations {
            if cancel.load(Ordering::Relaxed) {
                debug!(steps = self.steps - start; "Force simulation cancelled");
                break;
            }
            self.step();
            self.trace_progress();
        }
        self.steps - start
    }

    /// Finish the simulation: re-center the root and snapshot every body.
    pub fn into_layout(mut self) -> Layout {
        if let Some(root) = self.root {
            let center = self.viewport.center();
            let shift = center.sub_point(self.bodies[root].position);
            for body in &mut self.bodies {
                body.position = body.position.add_point(shift);
            }
            // The shifted root can be off by rounding; pin it exactly.
            self.bodies[root].position = center;
        }

        self.ids
            .iter()
            .zip(&self.bodies)
            .map(|(&id, body)| PlacedNode::new(id, body.position, body.size))
            .collect()
    }

    fn apply_repulsion(&mut self) {
        let ForceParams {
            repulsion_strength,
            epsilon,
            overlap_factor,
            ..
        } = self.params;
        let count = self.bodies.len();

        for a in 0..count {
            for b in 0..count {
                if a == b {
                    continue;
                }

                let body_a = self.bodies[a];
                let body_b = self.bodies[b];
                let delta = body_a.position.sub_point(body_b.position);
                let distance = delta.hypot() + epsilon;
                let direction = delta.scale(1.0 / distance);

                let min_distance = (body_a.size + body_b.size) / 2.0;
                if distance < min_distance {
                    let push = direction.scale((min_distance - distance) * overlap_factor);
                    self.bodies[a].velocity = self.bodies[a].velocity.add_point(push);
                    self.bodies[b].velocity = self.bodies[b].velocity.sub_point(push);
                }

                let repulsion = repulsion_strength / (distance * distance);
                self.bodies[a].velocity = self.bodies[a]
                    .velocity
                    .add_point(direction.scale(repulsion));
            }
        }
    }

    fn apply_springs(&mut self) {
        let ForceParams {
            spring_strength,
            ideal_length,
            ..
        } = self.params;

        for &(source, target) in &self.springs {
            let delta = self.bodies[target]
                .position
                .sub_point(self.bodies[source].position);
            let distance = delta.hypot();
            if distance == 0.0 {
                continue;
            }

            let attraction = (distance - ideal_length) * spring_strength;
            let force = delta.scale(attraction / distance);
            self.bodies[source].velocity = self.bodies[source].velocity.add_point(force);
            self.bodies[target].velocity = self.bodies[target].velocity.sub_point(force);
        }
    }

    fn integrate(&mut self) {
        let damping = self.params.damping;
        for body in &mut self.bodies {
            body.velocity = body.velocity.scale(damping);
            body.position = body.position.add_point(body.velocity);
        }
    }

    fn trace_progress(&self) {
        if self.steps % 100 == 0 {
            trace!(step = self.steps, energy = self.kinetic_energy(); "Force simulation progress");
        }
    }
}

/// Force layout engine
///
/// Runs a [`Simulation`] for the configured number of iterations.
#[derive(Debug, Clone, Default)]
pub struct ForceEngine {
    params: ForceParams,
}

impl ForceEngine {
    /// Create a new force layout engine
    pub fn new(params: ForceParams) -> Self {
        Self { params }
    }

    /// Returns the simulation parameters
    pub fn params(&self) -> &ForceParams {
        &self.params
    }

    /// Set the number of iterations for the force simulation
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.params.iterations = iterations;
        self
    }

    /// Set the spring constant for edge forces
    pub fn set_spring_strength(&mut self, strength: f32) -> &mut Self {
        self.params.spring_strength = strength;
        self
    }

    /// Set the repulsion constant for node forces
    pub fn set_repulsion_strength(&mut self, strength: f32) -> &mut Self {
        self.params.repulsion_strength = strength;
        self
    }

    /// Set the damping factor for the simulation
    pub fn set_damping(&mut self, damping: f32) -> &mut Self {
        self.params.damping = damping;
        self
    }
}

impl ForceEngine {
    fn run<R: Rng + ?Sized>(&self, graph: &Graph, viewport: Size, rng: &mut R) -> Layout {
        let mut simulation = Simulation::new(graph, viewport, self.params, rng);
        debug!(
            node_count = simulation.len(),
            edge_count = graph.edges().len(),
            iterations = self.params.iterations;
            "Running force simulation"
        );

        simulation.run(self.params.iterations);

        debug!(energy = simulation.kinetic_energy(); "Force simulation finished");
        simulation.into_layout()
    }
}

impl Engine for ForceEngine {
    fn calculate(&self, graph: &Graph, viewport: Size, rng: &mut dyn RngCore) -> Layout {
        self.run(graph, viewport, rng)
    }
}

/// Lay out a graph with the force engine, seeding the RNG from `seed`.
///
/// The same graph, viewport, parameters and seed always give the same layout.
/// `params` must pass [`ForceParams::validate`]; configuration loaded through
/// [`AppConfig::validate`](crate::config::AppConfig::validate) always does.
///
/// # Examples
///
/// ```
/// use nodeweave::layout::{ForceParams, layout};
/// use nodeweave_core::{geometry::Size, graph::Graph};
///
/// let graph = Graph::from_pairs([(0, 1), (0, 2), (1, 2)]);
/// let positions = layout(&graph, Size::new(800.0, 600.0), &ForceParams::default(), 7);
/// assert_eq!(positions.len(), 3);
/// ```
pub fn layout(graph: &Graph, viewport: Size, params: &ForceParams, seed: u64) -> Layout {
    let mut rng = StdRng::seed_from_u64(seed);
    ForceEngine::new(*params).run(graph, viewport, &mut rng)
}
