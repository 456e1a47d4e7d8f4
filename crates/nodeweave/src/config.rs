//! Configuration types for Nodeweave layout and rendering.
//!
//! This module provides configuration structures that control how graphs
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! loading from external sources such as TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout, viewport and style settings.
//! - [`LayoutConfig`] - Selects the [`LayoutEngine`] and carries its tuning parameters.
//! - [`ViewportConfig`] - The size of the drawing surface nodes are placed on.
//! - [`StyleConfig`] - Visual styling options such as background and edge colors.
//!
//! # Example
//!
//! ```
//! # use nodeweave::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [layout]
//!     engine = "radial"
//!
//!     [layout.force]
//!     iterations = 200
//!
//!     [viewport]
//!     width = 1024.0
//! "#).unwrap();
//!
//! assert_eq!(config.layout().force().iterations, 200);
//! assert_eq!(config.viewport().size().height(), 600.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use nodeweave_core::{color::Color, geometry::Size};

use crate::{
    error::NodeweaveError,
    layout::{ForceParams, LayoutEngine},
};

const DEFAULT_RING_SPACING: f32 = 200.0;
const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Viewport configuration section.
    #[serde(default)]
    viewport: ViewportConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(layout: LayoutConfig, viewport: ViewportConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            viewport,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns a mutable reference to the layout configuration.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the viewport configuration.
    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Returns a mutable reference to the viewport configuration.
    pub fn viewport_mut(&mut self) -> &mut ViewportConfig {
        &mut self.viewport
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`NodeweaveError::Config`] describing the first invalid setting.
    pub fn validate(&self) -> Result<(), NodeweaveError> {
        self.layout.validate()?;
        self.viewport.validate()?;
        self.style.validate()
    }
}

/// Layout engine selection and tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Which [`LayoutEngine`] positions the nodes.
    #[serde(default)]
    engine: LayoutEngine,

    /// Distance between consecutive rings of the radial engine.
    #[serde(default = "default_ring_spacing")]
    ring_spacing: f32,

    /// Force simulation parameters, also used for node sizing by every engine.
    #[serde(default)]
    force: ForceParams,
}

fn default_ring_spacing() -> f32 {
    DEFAULT_RING_SPACING
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            ring_spacing: DEFAULT_RING_SPACING,
            force: ForceParams::default(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(engine: LayoutEngine, ring_spacing: f32, force: ForceParams) -> Self {
        Self {
            engine,
            ring_spacing,
            force,
        }
    }

    /// Returns the selected [`LayoutEngine`].
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Overrides the selected [`LayoutEngine`].
    pub fn set_engine(&mut self, engine: LayoutEngine) -> &mut Self {
        self.engine = engine;
        self
    }

    /// Returns the radial ring spacing.
    pub fn ring_spacing(&self) -> f32 {
        self.ring_spacing
    }

    /// Returns the force simulation parameters.
    pub fn force(&self) -> &ForceParams {
        &self.force
    }

    /// Returns a mutable reference to the force simulation parameters.
    pub fn force_mut(&mut self) -> &mut ForceParams {
        &mut self.force
    }

    fn validate(&self) -> Result<(), NodeweaveError> {
        self.force
            .validate()
            .map_err(|message| NodeweaveError::Config(message.to_string()))?;
        ensure(
            self.ring_spacing.is_finite() && self.ring_spacing > 0.0,
            "ring_spacing must be a positive number",
        )
    }
}

/// Size of the drawing surface.
///
/// Engines seed initial positions inside `[0, width) × [0, height)` and
/// center the root on the middle of this area.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    width: f32,

    #[serde(default = "default_viewport_height")]
    height: f32,
}

fn default_viewport_width() -> f32 {
    DEFAULT_VIEWPORT_WIDTH
}

fn default_viewport_height() -> f32 {
    DEFAULT_VIEWPORT_HEIGHT
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl ViewportConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the viewport as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn set_width(&mut self, width: f32) -> &mut Self {
        self.width = width;
        self
    }

    pub fn set_height(&mut self, height: f32) -> &mut Self {
        self.height = height;
        self
    }

    fn validate(&self) -> Result<(), NodeweaveError> {
        ensure(
            self.width.is_finite() && self.width > 0.0,
            "viewport width must be a positive number",
        )?;
        ensure(
            self.height.is_finite() && self.height > 0.0,
            "viewport height must be a positive number",
        )
    }
}

/// Visual styling configuration for rendered graphs.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Canvas background color, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Edge line color, as a color string.
    #[serde(default)]
    edge_color: Option<String>,

    /// Edge line width.
    #[serde(default)]
    edge_width: Option<f32>,

    /// Node label color, as a color string.
    #[serde(default)]
    label_color: Option<String>,

    /// Node label font size.
    #[serde(default)]
    label_font_size: Option<f32>,

    /// Node image URL template; `{id}` is replaced by the node id.
    #[serde(default)]
    image_url: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed edge [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn edge_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.edge_color.as_deref(), "edge")
    }

    /// Returns the parsed label [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn label_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.label_color.as_deref(), "label")
    }

    pub fn edge_width(&self) -> Option<f32> {
        self.edge_width
    }

    pub fn label_font_size(&self) -> Option<f32> {
        self.label_font_size
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Sets the background color string.
    pub fn set_background_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.background_color = Some(color.into());
        self
    }

    fn validate(&self) -> Result<(), NodeweaveError> {
        self.background_color().map_err(NodeweaveError::Config)?;
        self.edge_color().map_err(NodeweaveError::Config)?;
        self.label_color().map_err(NodeweaveError::Config)?;
        ensure(
            self.edge_width.is_none_or(|width| width.is_finite() && width >= 0.0),
            "edge_width must not be negative",
        )?;
        ensure(
            self.label_font_size
                .is_none_or(|size| size.is_finite() && size > 0.0),
            "label_font_size must be a positive number",
        )
    }
}

fn parse_color(value: Option<&str>, name: &str) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {name} color in config: {err}"))
}

fn ensure(condition: bool, message: &str) -> Result<(), NodeweaveError> {
    if condition {
        Ok(())
    } else {
        Err(NodeweaveError::Config(message.to_string()))
    }
}
