//! Layout engines for positioning graph nodes.
//!
//! This module turns a [`Graph`](nodeweave_core::graph::Graph) into a
//! [`Layout`](nodeweave_core::graph::Layout): one positioned, sized node per
//! distinct id referenced by the edge list.
//!
//! # Pipeline Position
//!
//! ```text
//! Graph (edge list + optional root)
//!     ↓ layout (this module)
//! Layout (id → position, size)
//!     ↓ export
//! SVG
//! ```
//!
//! # Engines
//!
//! - `force` - Iterative spring-embedder simulation (default)
//! - `random` - Uniform random placement inside the viewport
//! - `radial` - Breadth-first levels on concentric rings around the root
//!
//! Every engine takes its randomness from a caller-supplied RNG, so a fixed
//! seed always reproduces the same layout.

mod engines;

pub use engines::{
    Engine, EngineBuilder, LayoutEngine,
    force::{ForceEngine, ForceParams, Simulation, layout},
    radial::RadialEngine,
    random::RandomEngine,
};
