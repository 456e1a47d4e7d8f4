//! CLI logic for the Nodeweave graph layout tool.
//!
//! Reads a graph file (or falls back to the built-in sample graph), lays it
//! out and writes the rendered SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use nodeweave::{
    GraphBuilder, NodeweaveError, config::AppConfig, geometry::Point, graph::NodeId, sample_graph,
    shell::Session,
};

/// Run the Nodeweave CLI application
///
/// Processes the input graph through the layout pipeline and writes the
/// resulting SVG to the output file.
///
/// # Errors
///
/// Returns `NodeweaveError` for:
/// - File I/O errors
/// - Configuration loading and validation errors
/// - Graph file parse errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), NodeweaveError> {
    info!(
        input_path:? = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);
    app_config.validate()?;

    let builder = GraphBuilder::new(app_config);
    let mut graph = match &args.input {
        Some(input) => {
            let source = fs::read_to_string(input)?;
            builder.parse(&source)?
        }
        None => {
            info!("No input file given, using the sample graph");
            sample_graph()
        }
    };
    if let Some(root) = args.root {
        graph.set_root(Some(NodeId::new(root)));
    }

    let pan = Point::new(args.pan_x, args.pan_y);
    let svg = match args.seed {
        Some(seed) => {
            debug!(seed; "Using explicit seed");
            let layout = builder.layout(&graph, seed);
            builder.render_svg(&graph, &layout, pan)?
        }
        None => {
            let mut session = Session::with_generation(builder, graph, args.generation);
            debug!(generation = session.generation(), seed = session.seed(); "Using generation seed");
            session.pan_mut().set_offset(pan);
            session.render_svg()?
        }
    };

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Command-line settings take precedence over the configuration file.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(engine) = args.engine {
        config.layout_mut().set_engine(engine);
    }
    if let Some(width) = args.width {
        config.viewport_mut().set_width(width);
    }
    if let Some(height) = args.height {
        config.viewport_mut().set_height(height);
    }
}

#[cfg(test)]
mod tests {
    use nodeweave::layout::LayoutEngine;

    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let mut config = AppConfig::default();
        let args = Args {
            engine: Some(LayoutEngine::Radial),
            width: Some(1024.0),
            ..Args::default()
        };

        apply_overrides(&mut config, &args);

        assert_eq!(config.layout().engine(), LayoutEngine::Radial);
        assert_eq!(config.viewport().size().width(), 1024.0);
        assert_eq!(config.viewport().size().height(), 600.0);
    }
}
