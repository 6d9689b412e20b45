//! Deduplication
//!
//! First occurrence wins, order is preserved. Edges are keyed by the ordered
//! `(source, target)` pair, so `a -> b` and `b -> a` both survive.

use crate::types::{CitationGraph, Edge, Node};
use std::collections::HashSet;

/// Keep the first node for each id
pub fn dedup_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let mut seen = HashSet::with_capacity(nodes.len());
    nodes
        .into_iter()
        .filter(|node| seen.insert(node.id.clone()))
        .collect()
}

/// Keep the first edge for each ordered pair
pub fn dedup_edges(edges: Vec<Edge>) -> Vec<Edge> {
    let mut seen = HashSet::with_capacity(edges.len());
    edges
        .into_iter()
        .filter(|edge| seen.insert((edge.source.clone(), edge.target.clone())))
        .collect()
}

/// Deduplicate nodes and edges independently
pub fn deduplicate(graph: CitationGraph) -> CitationGraph {
    CitationGraph::new(dedup_nodes(graph.nodes), dedup_edges(graph.edges))
}
