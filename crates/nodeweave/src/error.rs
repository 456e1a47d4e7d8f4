//! Error types for Nodeweave operations.
//!
//! This module provides the main error type [`NodeweaveError`]. Layout
//! engines themselves never fail; errors come from reading graph files,
//! validating configuration and preparing the renderer.

use std::io;

use thiserror::Error;

use crate::export;

/// The main error type for Nodeweave operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the TOML error so the
/// failing span can be shown to the user.
#[derive(Debug, Error)]
pub enum NodeweaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: toml::de::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

impl NodeweaveError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
