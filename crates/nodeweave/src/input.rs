//! Graph input: the TOML graph file format and the built-in sample graph.
//!
//! ```toml
//! root = 0                          # optional
//! edges = [[0, 1], [0, 2], [1, 2]]
//! ```
//!
//! Node ids are non-negative integers. Nodes are implied by the edges that
//! reference them; there is no separate node list.

use log::{debug, warn};
use serde::{Deserialize, Deserializer, de};

use nodeweave_core::graph::{Edge, Graph, NodeId};

use crate::NodeweaveError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphFile {
    #[serde(default)]
    root: Option<NodeId>,
    #[serde(default, deserialize_with = "edge_pairs")]
    edges: Vec<Edge>,
}

/// Each entry must be exactly `[source, target]`; longer or shorter arrays
/// are rejected rather than truncated.
fn edge_pairs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Edge>, D::Error> {
    Vec::<Vec<NodeId>>::deserialize(deserializer)?
        .into_iter()
        .map(|pair| match pair[..] {
            [source, target] => Ok(Edge::new(source, target)),
            _ => Err(de::Error::invalid_length(
                pair.len(),
                &"a [source, target] pair of node ids",
            )),
        })
        .collect()
}

/// Parse a graph file.
///
/// # Errors
///
/// Returns [`NodeweaveError::Parse`] carrying the source text when the input
/// is not a valid graph file.
pub fn parse_graph(source: &str) -> Result<Graph, NodeweaveError> {
    let file: GraphFile =
        toml::from_str(source).map_err(|err| NodeweaveError::new_parse_error(err, source))?;

    let mut graph = Graph::new(file.edges);
    graph.set_root(file.root);

    if let Some(root) = file.root.filter(|&root| !graph.contains_node(root)) {
        warn!(root:% = root; "Root is not referenced by any edge");
    }
    debug!(edge_count = graph.edges().len(), root:? = file.root; "Graph parsed");

    Ok(graph)
}

/// The demo graph shown when no input is given: hub `0` with thirteen
/// neighbours, `13` fanning out to four more and `17` to two.
pub fn sample_graph() -> Graph {
    let hub = (1..=13).map(|target| (0, target));
    let rest = [(13, 14), (13, 15), (13, 16), (13, 17), (17, 18), (17, 19)];
    Graph::from_pairs(hub.chain(rest)).with_root(NodeId::new(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edges_and_root() {
        let graph = parse_graph("root = 2\nedges = [[2, 0], [0, 1]]").unwrap();

        assert_eq!(graph.root(), Some(NodeId::new(2)));
        assert_eq!(graph.edges(), &[Edge::new(2, 0), Edge::new(0, 1)]);
    }

    #[test]
    fn test_parse_without_root() {
        let graph = parse_graph("edges = [[0, 1]]").unwrap();
        assert_eq!(graph.root(), None);
    }

    #[test]
    fn test_parse_empty_file() {
        let graph = parse_graph("").unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_parse_rejects_negative_id() {
        let err = parse_graph("edges = [[0, -1]]").unwrap_err();
        match err {
            NodeweaveError::Parse { src, .. } => assert_eq!(src, "edges = [[0, -1]]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        assert!(parse_graph("edges = []\nnodes = [1]").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_pair() {
        for source in ["edges = [[0, 1, 2]]", "edges = [[0]]", "edges = [[0, 1], []]"] {
            let err = parse_graph(source).unwrap_err();
            assert!(
                matches!(err, NodeweaveError::Parse { .. }),
                "{source}: unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_sample_graph_shape() {
        let graph = sample_graph();

        assert_eq!(graph.edges().len(), 19);
        assert_eq!(graph.node_ids().len(), 20);
        assert_eq!(graph.root(), Some(NodeId::new(0)));
        assert!(graph.edges().contains(&Edge::new(17, 19)));
    }
}
