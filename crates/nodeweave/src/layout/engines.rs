//! Layout engine factory module
//!
//! This module provides the [`Engine`] trait implemented by every layout
//! algorithm, the [`LayoutEngine`] selector used by configuration and the
//! command line, and the [`EngineBuilder`] that turns a selector into a
//! configured engine.

pub mod force;
pub mod radial;
pub mod random;

use std::{fmt, str::FromStr};

use log::debug;
use rand::{Rng, RngCore};
use serde::Deserialize;

use nodeweave_core::{
    geometry::{Point, Size},
    graph::{Graph, Layout},
};

use force::{ForceEngine, ForceParams};
use radial::RadialEngine;
use random::RandomEngine;

/// Available layout algorithms.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Force-directed simulation (default)
    #[default]
    Force,
    /// Uniform random placement
    Random,
    /// Concentric rings around the root
    Radial,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "force" => Ok(Self::Force),
            "random" => Ok(Self::Random),
            "radial" => Ok(Self::Radial),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Force => "force",
            LayoutEngine::Random => "random",
            LayoutEngine::Radial => "radial",
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Trait defining the interface for graph layout engines
pub trait Engine {
    /// Calculate a layout for the graph
    ///
    /// - `graph`: The edge list (and optional root) to lay out
    /// - `viewport`: The drawing surface; initial positions fall inside it
    ///   and the root is centered on it
    /// - `rng`: Source of randomness; engines draw nothing else at random
    ///
    /// Engines never fail: malformed input degrades to a smaller layout.
    fn calculate(&self, graph: &Graph, viewport: Size, rng: &mut dyn RngCore) -> Layout;
}

/// Builder for creating and configuring layout engines.
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    force: ForceParams,
    ring_spacing: Option<f32>,
}

impl EngineBuilder {
    /// Create a new engine builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the force simulation parameters (node sizing applies to every engine)
    pub fn with_force_params(mut self, params: ForceParams) -> Self {
        self.force = params;
        self
    }

    /// Set the distance between rings of the radial engine
    pub fn with_ring_spacing(mut self, spacing: f32) -> Self {
        self.ring_spacing = Some(spacing);
        self
    }

    /// Build the engine for the requested algorithm
    pub fn build(self, kind: LayoutEngine) -> Box<dyn Engine> {
        debug!(engine:% = kind; "Building layout engine");
        match kind {
            LayoutEngine::Force => Box::new(ForceEngine::new(self.force)),
            LayoutEngine::Random => Box::new(RandomEngine::new(
                self.force.node_size,
                self.force.root_scale,
            )),
            LayoutEngine::Radial => {
                let mut engine = RadialEngine::new(self.force.node_size, self.force.root_scale);
                if let Some(spacing) = self.ring_spacing {
                    engine.set_ring_spacing(spacing);
                }
                Box::new(engine)
            }
        }
    }
}

/// Uniform random point inside `[0, width) × [0, height)`.
///
/// A degenerate extent collapses to `0` on that axis instead of panicking on
/// an empty range.
pub(crate) fn random_point<R: Rng + ?Sized>(rng: &mut R, viewport: Size) -> Point {
    Point::new(
        random_coordinate(rng, viewport.width()),
        random_coordinate(rng, viewport.height()),
    )
}

fn random_coordinate<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.random_range(0.0..extent)
    } else {
        0.0
    }
}
