//! Citation graph representation
//!
//! Node order is carried explicitly: `nodes` is a sequence, and the layout
//! engine places nodes by their position in it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Paper node as handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Paper id
    pub id: String,

    /// Title, or a placeholder when the paper has none
    pub label: String,

    /// Publication year
    pub year: Option<i32>,

    /// Resolved link to the paper
    pub url: String,

    /// Whether any edge starts or ends at this node
    pub is_connected: bool,

    /// Horizontal position, assigned by the layout engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,

    /// Vertical position, assigned by the layout engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Node {
    /// Assigned coordinates, if the node has been laid out
    pub fn position(&self) -> Option<(f64, f64)> {
        self.x.zip(self.y)
    }
}

/// Directed citation: `source` references `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Citing paper id
    pub source: String,

    /// Cited paper id
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether `id` is either endpoint
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

/// Ordered nodes plus the edges between them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CitationGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl CitationGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Find a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Set of node ids
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }

    /// Summary counts
    pub fn stats(&self) -> GraphStats {
        let connected_count = self.nodes.iter().filter(|node| node.is_connected).count();
        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            connected_count,
            isolated_count: self.nodes.len() - connected_count,
        }
    }
}

/// Graph summary counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub connected_count: usize,
    pub isolated_count: usize,
}
