//! Connected/isolated classification
//!
//! A node is connected when at least one edge, in either direction, touches it.

use crate::types::{CitationGraph, Edge};
use std::collections::HashSet;

/// Every id that is an endpoint of some edge
pub fn connected_ids(edges: &[Edge]) -> HashSet<String> {
    edges
        .iter()
        .flat_map(|edge| [edge.source.clone(), edge.target.clone()])
        .collect()
}

/// Set `is_connected` on every node from the endpoint set
pub fn classify(mut graph: CitationGraph, connected: &HashSet<String>) -> CitationGraph {
    for node in &mut graph.nodes {
        node.is_connected = connected.contains(node.id.as_str());
    }
    graph
}

/// Classify against the graph's own edges
pub fn classify_by_edges(graph: CitationGraph) -> CitationGraph {
    let connected = connected_ids(&graph.edges);
    classify(graph, &connected)
}
