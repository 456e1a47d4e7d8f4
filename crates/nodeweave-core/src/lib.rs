//! Nodeweave Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Nodeweave layout
//! engines and renderer. It includes:
//!
//! - **Graph model**: node ids, edges, graphs and layout results ([`graph`] module)
//! - **Geometry**: points, sizes and bounding boxes ([`geometry`] module)
//! - **Colors**: CSS color handling for rendering ([`color::Color`])

pub mod color;
pub mod geometry;
pub mod graph;
