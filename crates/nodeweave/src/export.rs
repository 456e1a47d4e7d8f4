//! Export functionality for laid-out graphs.
//!
//! This is the final stage of the pipeline: a [`Layout`] and the edge list it
//! was computed from become an output document.
//!
//! # Pipeline Position
//!
//! ```text
//! Graph (edge list + optional root)
//!     ↓ layout
//! Layout (id → position, size)
//!     ↓ export (this module)
//! SVG
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! [`Layout`]: nodeweave_core::graph::Layout

/// SVG export backend.
pub mod svg;

use thiserror::Error;

/// Errors that can occur while preparing an export backend.
///
/// Rendering itself does not fail; this type converts into
/// [`NodeweaveError::Export`] at the crate boundary.
///
/// [`NodeweaveError::Export`]: crate::NodeweaveError::Export
#[derive(Debug, Error)]
pub enum Error {
    /// A style setting could not be turned into a drawing attribute.
    #[error("Style error: {0}")]
    Style(String),
}
