//! Nodeweave - force-directed graph layout with SVG rendering
//!
//! This library positions the nodes of a small directed graph on a 2-D plane
//! and renders the result. Graphs are plain edge lists with an optional root
//! node; the root is kept on the center of the viewport and drawn larger.
//!
//! The pipeline is `parse → layout → render`, driven by [`GraphBuilder`].
//! The [`shell`] module adds the interactive state a viewer needs on top:
//! drag-to-pan and layout regeneration with memoized results.

pub mod config;
pub mod export;
pub mod input;
pub mod layout;
pub mod shell;

mod error;

pub use nodeweave_core::{color, geometry, graph};

pub use error::NodeweaveError;
pub use input::{parse_graph, sample_graph};

use log::{debug, info, trace};
use rand::{SeedableRng, rngs::StdRng};

use config::AppConfig;
use geometry::Point;
use graph::{Graph, Layout};

/// Builder for parsing, laying out and rendering graphs.
///
/// # Examples
///
/// ```
/// use nodeweave::{GraphBuilder, config::AppConfig};
/// use nodeweave_core::geometry::Point;
///
/// let builder = GraphBuilder::new(AppConfig::default());
///
/// let graph = builder.parse("root = 0\nedges = [[0, 1], [0, 2], [1, 2]]")
///     .expect("Failed to parse");
/// let layout = builder.layout(&graph, 42);
/// assert_eq!(layout.len(), 3);
///
/// let svg = builder.render_svg(&graph, &layout, Point::default())
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: AppConfig,
}

impl GraphBuilder {
    /// Create a new graph builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML graph file.
    ///
    /// # Errors
    ///
    /// Returns [`NodeweaveError::Parse`] if the source is not a valid graph file.
    pub fn parse(&self, source: &str) -> Result<Graph, NodeweaveError> {
        info!("Parsing graph");
        let graph = parse_graph(source)?;
        trace!(graph:?; "Parsed graph");
        Ok(graph)
    }

    /// Lay the graph out with the configured engine.
    ///
    /// Deterministic: the same graph, configuration and seed always produce
    /// the same layout.
    pub fn layout(&self, graph: &Graph, seed: u64) -> Layout {
        let layout_config = self.config.layout();
        let engine = layout::EngineBuilder::new()
            .with_force_params(*layout_config.force())
            .with_ring_spacing(layout_config.ring_spacing())
            .build(layout_config.engine());

        info!(engine:% = layout_config.engine(), seed; "Calculating layout");
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = engine.calculate(graph, self.config.viewport().size(), &mut rng);
        debug!(node_count = layout.len(); "Layout calculated");
        layout
    }

    /// Render a laid-out graph to an SVG string, translated by `pan`.
    ///
    /// # Errors
    ///
    /// Returns [`NodeweaveError::Export`] if the style configuration cannot
    /// be resolved.
    pub fn render_svg(
        &self,
        graph: &Graph,
        layout: &Layout,
        pan: Point,
    ) -> Result<String, NodeweaveError> {
        let svg = export::svg::SvgBuilder::new(self.config.viewport().size())
            .with_style(self.config.style())
            .with_pan(pan)
            .build()?;

        let document = svg.render(graph, layout);
        info!("SVG rendered successfully");
        Ok(document.to_string())
    }
}
