//! Title filter
//!
//! Derives the induced subgraph of nodes whose label contains the query,
//! case-insensitively. Coordinates are carried over, never recomputed.

use crate::types::CitationGraph;
use std::collections::HashSet;

/// Induced subgraph of `full` on title matches; blank queries return `full`
pub fn filter_graph(full: &CitationGraph, query: &str) -> CitationGraph {
    if query.trim().is_empty() {
        return full.clone();
    }
    // Only blankness is judged on the trimmed query; matching uses it as typed
    let needle = query.to_lowercase();

    let nodes: Vec<_> = full
        .nodes
        .iter()
        .filter(|node| node.label.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    let kept: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let edges = full
        .edges
        .iter()
        .filter(|edge| kept.contains(edge.source.as_str()) && kept.contains(edge.target.as_str()))
        .cloned()
        .collect();

    CitationGraph::new(nodes, edges)
}
