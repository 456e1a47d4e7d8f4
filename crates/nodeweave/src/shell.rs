//! Interactive session state: panning and layout regeneration.
//!
//! A [`Session`] holds everything a viewer needs between frames. Layouts are
//! computed lazily and memoized per generation; [`Session::regenerate`] bumps
//! the generation so the next request lays the graph out again with a fresh
//! seed. Panning never triggers a new layout, it only changes the translation
//! applied at render time.

use log::{debug, info};

use nodeweave_core::{
    geometry::Point,
    graph::{Graph, Layout},
};

use crate::{GraphBuilder, NodeweaveError};

/// Drag-to-pan state.
///
/// Pointer motion only moves the view while the button is held.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanState {
    pressed: bool,
    offset: Point,
}

impl PanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// End a drag
    pub fn release(&mut self) {
        self.pressed = false;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Apply relative pointer motion; ignored unless a drag is in progress.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if self.pressed {
            self.offset = self.offset.add_point(Point::new(dx, dy));
        }
    }

    /// Accumulated translation
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Jump straight to an absolute offset, whether or not a drag is active.
    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }
}

/// Seed used to lay out the graph in a given generation.
///
/// A splitmix64 finalizer, so neighbouring generations get unrelated seeds
/// and the same generation always gets the same one.
pub fn seed_for_generation(generation: u64) -> u64 {
    let mut z = generation.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A graph being viewed, with its current layout generation and pan state.
///
/// # Examples
///
/// ```
/// use nodeweave::{GraphBuilder, config::AppConfig, sample_graph, shell::Session};
///
/// let mut session = Session::new(GraphBuilder::new(AppConfig::default()), sample_graph());
/// let before = session.layout().clone();
///
/// session.pan_mut().press();
/// session.pan_mut().drag(15.0, 5.0);
/// assert_eq!(session.layout(), &before);
///
/// session.regenerate();
/// assert_ne!(session.layout(), &before);
/// ```
#[derive(Debug)]
pub struct Session {
    builder: GraphBuilder,
    graph: Graph,
    generation: u64,
    pan: PanState,
    cached: Option<(u64, Layout)>,
}

impl Session {
    pub fn new(builder: GraphBuilder, graph: Graph) -> Self {
        Self::with_generation(builder, graph, 0)
    }

    /// Start at a specific generation, e.g. to reproduce an earlier layout
    pub fn with_generation(builder: GraphBuilder, graph: Graph, generation: u64) -> Self {
        Self {
            builder,
            graph,
            generation,
            pan: PanState::default(),
            cached: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Seed of the current generation
    pub fn seed(&self) -> u64 {
        seed_for_generation(self.generation)
    }

    pub fn pan(&self) -> &PanState {
        &self.pan
    }

    pub fn pan_mut(&mut self) -> &mut PanState {
        &mut self.pan
    }

    /// Discard the current layout; the next one uses a new seed.
    ///
    /// Returns the new generation.
    pub fn regenerate(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        info!(generation = self.generation; "Regenerating layout");
        self.generation
    }

    /// Layout of the current generation, computed on first use
    pub fn layout(&mut self) -> &Layout {
        let generation = self.generation;
        if self
            .cached
            .as_ref()
            .is_some_and(|(cached, _)| *cached != generation)
        {
            self.cached = None;
        }

        let builder = &self.builder;
        let graph = &self.graph;
        let (_, layout) = self.cached.get_or_insert_with(|| {
            debug!(generation; "Computing layout");
            (generation, builder.layout(graph, seed_for_generation(generation)))
        });
        layout
    }

    /// Render the current layout with the current pan offset
    pub fn render_svg(&mut self) -> Result<String, NodeweaveError> {
        let pan = self.pan.offset();
        let layout = self.layout().clone();
        self.builder.render_svg(&self.graph, &layout, pan)
    }
}

#[cfg(test)]
mod tests {
    use nodeweave_core::graph::NodeId;

    use super::*;
    use crate::config::AppConfig;

    fn session() -> Session {
        let graph = Graph::from_pairs([(0, 1), (0, 2), (2, 3)]).with_root(NodeId::new(0));
        Session::new(GraphBuilder::new(AppConfig::default()), graph)
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let mut pan = PanState::new();
        pan.drag(10.0, 10.0);
        assert_eq!(pan.offset(), Point::default());
    }

    #[test]
    fn test_drag_accumulates_while_pressed() {
        let mut pan = PanState::new();
        pan.press();
        pan.drag(10.0, -4.0);
        pan.drag(2.5, 1.0);
        pan.release();
        pan.drag(100.0, 100.0);

        assert!(!pan.is_pressed());
        assert_eq!(pan.offset(), Point::new(12.5, -3.0));
    }

    #[test]
    fn test_set_offset_replaces_accumulated_drag() {
        let mut pan = PanState::new();
        pan.press();
        pan.drag(10.0, 10.0);
        pan.set_offset(Point::new(-3.0, 7.0));
        pan.drag(1.0, 1.0);

        assert_eq!(pan.offset(), Point::new(-2.0, 8.0));
    }

    #[test]
    fn test_seed_is_pure_function_of_generation() {
        assert_eq!(seed_for_generation(3), seed_for_generation(3));
        assert_ne!(seed_for_generation(0), seed_for_generation(1));
        assert_ne!(seed_for_generation(1), seed_for_generation(2));
    }

    #[test]
    fn test_layout_is_memoized() {
        let mut session = session();
        let first = session.layout().clone();
        let second = session.layout().clone();
        assert_eq!(first, second);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_regenerate_recomputes() {
        let mut session = session();
        let first = session.layout().clone();

        assert_eq!(session.regenerate(), 1);
        let second = session.layout().clone();

        let first_ids: Vec<NodeId> = first.ids().collect();
        let second_ids: Vec<NodeId> = second.ids().collect();
        assert_eq!(first_ids, second_ids);
        assert_ne!(first, second);
    }

    #[test]
    fn test_same_generation_reproduces_layout() {
        let mut a = session();
        let graph = a.graph().clone();
        let mut b = Session::with_generation(GraphBuilder::new(AppConfig::default()), graph, 5);

        for _ in 0..5 {
            a.regenerate();
        }
        assert_eq!(a.seed(), b.seed());
        assert_eq!(a.layout(), b.layout());
    }

    #[test]
    fn test_pan_does_not_relayout() {
        let mut session = session();
        let before = session.layout().clone();

        session.pan_mut().press();
        session.pan_mut().drag(30.0, 40.0);
        session.pan_mut().release();

        assert_eq!(session.layout(), &before);
        let svg = session.render_svg().unwrap();
        assert!(svg.contains("translate(30, 40)"));
    }
}
