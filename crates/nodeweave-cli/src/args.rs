//! Command-line argument definitions for the Nodeweave CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity and per-run overrides of the layout.

use clap::Parser;

use nodeweave::layout::LayoutEngine;

/// Command-line arguments for the Nodeweave graph layout tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph file (TOML); the built-in sample graph is used when omitted
    #[arg(help = "Path to the input graph file")]
    pub input: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Layout engine (force, random, radial); overrides the configuration
    #[arg(short, long)]
    pub engine: Option<LayoutEngine>,

    /// Layout generation; each generation lays the graph out with a different seed
    #[arg(short, long, default_value_t = 0)]
    pub generation: u64,

    /// Explicit RNG seed; takes precedence over the generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Root node id; overrides the root of the input file
    #[arg(long)]
    pub root: Option<u32>,

    /// Viewport width
    #[arg(long)]
    pub width: Option<f32>,

    /// Viewport height
    #[arg(long)]
    pub height: Option<f32>,

    /// Horizontal pan offset applied when rendering
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub pan_x: f32,

    /// Vertical pan offset applied when rendering
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub pan_y: f32,
}
