//! Graph construction
//!
//! One node per identified record, one edge per reference that resolves to a
//! paper in the corpus. References to papers outside the corpus yield no edge.

use crate::index::RecordIndex;
use crate::types::{CitationGraph, Edge, Node};
use citenet_common::PaperRecord;
use std::collections::HashSet;
use tracing::{debug, info};

/// Label for papers without a title
pub const UNTITLED_LABEL: &str = "Untitled";

/// Canonical paper page, the id is appended
pub const PAPER_VIEWER_URL: &str = "https://www.semanticscholar.org/paper/";

/// Search fallback, the percent-encoded title is appended
pub const SCHOLAR_SEARCH_URL: &str = "https://scholar.google.com/scholar?q=";

/// Search phrase when there is no title either
pub const GENERIC_SEARCH_PHRASE: &str = "research paper";

/// Stored url that means "no url"
const PLACEHOLDER_URL: &str = "#";

/// Nodes and edges before deduplication, plus every edge endpoint
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub graph: CitationGraph,
    pub connected: HashSet<String>,
}

/// Derives nodes and validated edges from a corpus
pub struct GraphBuilder<'i, 'a> {
    index: &'i RecordIndex<'a>,
}

impl<'i, 'a> GraphBuilder<'i, 'a> {
    pub fn new(index: &'i RecordIndex<'a>) -> Self {
        Self { index }
    }

    /// Build nodes and edges in corpus order
    pub fn build(&self, records: &[PaperRecord]) -> BuildOutput {
        let mut nodes = Vec::with_capacity(records.len());
        let mut edges = Vec::new();
        let mut connected = HashSet::new();
        let mut skipped = 0usize;

        info!(papers = records.len(), "Processing papers for connections");

        for record in records {
            let Some(id) = record.key() else {
                skipped += 1;
                continue;
            };

            nodes.push(Node {
                id: id.to_string(),
                label: node_label(record),
                year: record.year,
                url: resolve_url(record),
                is_connected: false,
                x: None,
                y: None,
            });

            let mut resolved = 0usize;
            for reference in &record.references {
                if !self.index.contains(reference) {
                    continue;
                }
                edges.push(Edge::new(id, reference.as_str()));
                connected.insert(id.to_string());
                connected.insert(reference.clone());
                resolved += 1;
            }

            if !record.references.is_empty() {
                debug!(
                    paper = id,
                    references = record.references.len(),
                    resolved,
                    "Resolved references"
                );
            }
        }

        if skipped > 0 {
            debug!(skipped, "Skipped records without an id");
        }

        BuildOutput {
            graph: CitationGraph::new(nodes, edges),
            connected,
        }
    }
}

/// The record's title unless it is missing or blank
fn present_title(record: &PaperRecord) -> Option<&str> {
    record
        .title
        .as_deref()
        .filter(|title| !title.trim().is_empty())
}

/// Title, or the placeholder label when missing or blank
pub fn node_label(record: &PaperRecord) -> String {
    present_title(record).unwrap_or(UNTITLED_LABEL).to_string()
}

/// The record's own url, else its canonical page, else a title search
pub fn resolve_url(record: &PaperRecord) -> String {
    if let Some(url) = record.url.as_deref() {
        if !url.trim().is_empty() && url != PLACEHOLDER_URL {
            return url.to_string();
        }
    }

    if let Some(id) = record.key() {
        return format!("{}{}", PAPER_VIEWER_URL, id);
    }

    let phrase = present_title(record).unwrap_or(GENERIC_SEARCH_PHRASE);
    format!("{}{}", SCHOLAR_SEARCH_URL, urlencoding::encode(phrase))
}
