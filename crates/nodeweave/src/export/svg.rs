//! SVG rendering of a graph layout.
//!
//! Output structure, from back to front:
//!
//! ```text
//! <svg width height viewBox>
//!   <rect/>                       background, not panned
//!   <defs> clipPath per node </defs>
//!   <g transform="translate(tx, ty)">
//!     <g class="edges">  line per edge  </g>
//!     <g class="nodes">  image + label per node  </g>
//!   </g>
//! </svg>
//! ```
//!
//! Edges are drawn before nodes so that node images cover their endpoints.

use log::{debug, warn};
use svg::{self, node::element as svg_element};

use nodeweave_core::{
    color::Color,
    geometry::{Point, Size},
    graph::{Graph, Layout, NodeId, PlacedNode},
};

use crate::{config::StyleConfig, export};

const DEFAULT_BACKGROUND_COLOR: &str = "#101010";
const DEFAULT_EDGE_COLOR: &str = "gray";
const DEFAULT_EDGE_WIDTH: f32 = 2.0;
const DEFAULT_LABEL_COLOR: &str = "black";
const DEFAULT_LABEL_FONT_SIZE: f32 = 14.0;
const DEFAULT_LABEL_FONT_FAMILY: &str = "serif";
const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/400/400?random={id}";

/// Labels sit slightly left of and below the node center.
const LABEL_OFFSET: Point = Point::new(-5.0, 5.0);

/// Builder for [`Svg`] renderers.
///
/// # Examples
///
/// ```
/// use nodeweave::{config::StyleConfig, export::svg::SvgBuilder};
/// use nodeweave_core::geometry::{Point, Size};
///
/// let svg = SvgBuilder::new(Size::new(800.0, 600.0))
///     .with_style(&StyleConfig::default())
///     .with_pan(Point::new(10.0, -20.0))
///     .build()
///     .unwrap();
/// assert_eq!(svg.pan(), Point::new(10.0, -20.0));
/// ```
#[derive(Debug)]
pub struct SvgBuilder<'a> {
    viewport: Size,
    style: Option<&'a StyleConfig>,
    pan: Point,
}

impl<'a> SvgBuilder<'a> {
    /// Create a builder rendering into a document of the given size
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            style: None,
            pan: Point::default(),
        }
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the translation applied to everything except the background
    pub fn with_pan(mut self, pan: Point) -> Self {
        self.pan = pan;
        self
    }

    /// Resolve the style into concrete drawing attributes.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Style`] if a configured color cannot be parsed.
    pub fn build(self) -> Result<Svg, export::Error> {
        let style = self.style.cloned().unwrap_or_default();

        let background_color = resolve_color(style.background_color(), DEFAULT_BACKGROUND_COLOR)?;
        let edge_color = resolve_color(style.edge_color(), DEFAULT_EDGE_COLOR)?;
        let label_color = resolve_color(style.label_color(), DEFAULT_LABEL_COLOR)?;

        Ok(Svg {
            viewport: self.viewport,
            pan: self.pan,
            background_color,
            edge_color,
            edge_width: style.edge_width().unwrap_or(DEFAULT_EDGE_WIDTH),
            label_color,
            label_font_size: style.label_font_size().unwrap_or(DEFAULT_LABEL_FONT_SIZE),
            image_url: style.image_url().unwrap_or(DEFAULT_IMAGE_URL).to_string(),
        })
    }
}

fn resolve_color(
    configured: Result<Option<Color>, String>,
    fallback: &str,
) -> Result<Color, export::Error> {
    match configured.map_err(export::Error::Style)? {
        Some(color) => Ok(color),
        None => Color::new(fallback).map_err(export::Error::Style),
    }
}

/// SVG renderer with resolved styling.
#[derive(Debug, Clone)]
pub struct Svg {
    viewport: Size,
    pan: Point,
    background_color: Color,
    edge_color: Color,
    edge_width: f32,
    label_color: Color,
    label_font_size: f32,
    image_url: String,
}

impl Svg {
    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Image reference for a node, built from the URL template.
    pub fn image_href(&self, id: NodeId) -> String {
        self.image_url.replace("{id}", &id.to_string())
    }

    /// Renders the layout and its edges to an SVG document.
    ///
    /// Edges whose endpoints are missing from the layout are skipped.
    pub fn render(&self, graph: &Graph, layout: &Layout) -> svg::Document {
        debug!(
            node_count = layout.len(),
            edge_count = graph.edges().len(),
            pan:? = self.pan;
            "Rendering SVG"
        );

        let doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.viewport.width(), self.viewport.height()),
            )
            .set("width", self.viewport.width())
            .set("height", self.viewport.height());

        let doc = doc.add(self.render_background());
        let doc = doc.add(self.render_clip_paths(layout));

        let mut content = svg_element::Group::new();
        if !self.pan.is_zero() {
            content = content.set(
                "transform",
                format!("translate({}, {})", self.pan.x(), self.pan.y()),
            );
        }
        content = content
            .add(self.render_edges(graph, layout))
            .add(self.render_nodes(layout));

        doc.add(content)
    }

    fn render_background(&self) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", self.viewport.width())
            .set("height", self.viewport.height())
            .set("fill", &self.background_color)
            .set("fill-opacity", self.background_color.alpha())
    }

    /// One circular clip path per node, identified by [`clip_id`].
    fn render_clip_paths(&self, layout: &Layout) -> svg_element::Definitions {
        layout
            .iter()
            .fold(svg_element::Definitions::new(), |defs, node| {
                let circle = svg_element::Circle::new()
                    .set("cx", node.position().x())
                    .set("cy", node.position().y())
                    .set("r", node.size() / 2.0);
                defs.add(
                    svg_element::ClipPath::new()
                        .set("id", clip_id(node.id()))
                        .add(circle),
                )
            })
    }

    fn render_edges(&self, graph: &Graph, layout: &Layout) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "edges");

        for edge in graph.edges() {
            let (Some(source), Some(target)) =
                (layout.position(edge.source()), layout.position(edge.target()))
            else {
                warn!(
                    source:% = edge.source(),
                    target:% = edge.target();
                    "Skipping edge with an endpoint missing from the layout"
                );
                continue;
            };

            let line = svg_element::Line::new()
                .set("x1", source.x())
                .set("y1", source.y())
                .set("x2", target.x())
                .set("y2", target.y())
                .set("stroke", &self.edge_color)
                .set("stroke-opacity", self.edge_color.alpha())
                .set("stroke-width", self.edge_width);
            group = group.add(line);
        }

        group
    }

    fn render_nodes(&self, layout: &Layout) -> svg_element::Group {
        layout
            .iter()
            .fold(svg_element::Group::new().set("class", "nodes"), |group, node| {
                group.add(self.render_node(node))
            })
    }

    fn render_node(&self, node: &PlacedNode) -> svg_element::Group {
        let bounds = node.bounds();

        let image = svg_element::Image::new()
            .set("href", self.image_href(node.id()))
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("preserveAspectRatio", "xMidYMid slice")
            .set("clip-path", format!("url(#{})", clip_id(node.id())));

        let label_position = node.position().add_point(LABEL_OFFSET);
        let label = svg_element::Text::new(node.id().to_string())
            .set("x", label_position.x())
            .set("y", label_position.y())
            .set("fill", &self.label_color)
            .set("font-family", DEFAULT_LABEL_FONT_FAMILY)
            .set("font-size", self.label_font_size)
            .set("font-weight", "bold");

        svg_element::Group::new()
            .set("id", format!("node-{}", node.id()))
            .add(image)
            .add(label)
    }
}

fn clip_id(id: NodeId) -> String {
    format!("node-clip-{id}")
}
