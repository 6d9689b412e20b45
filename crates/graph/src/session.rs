//! Cached graph session
//!
//! Holds the full laid-out graph for the lifetime of a corpus snapshot and the
//! current filtered view. A new filter replaces the previous view; reset
//! returns to the full graph.

use crate::filter::filter_graph;
use crate::types::CitationGraph;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CitationSession {
    full: Arc<CitationGraph>,
    view: Option<CitationGraph>,
    query: String,
}

impl CitationSession {
    pub fn new(full: impl Into<Arc<CitationGraph>>) -> Self {
        Self {
            full: full.into(),
            view: None,
            query: String::new(),
        }
    }

    /// The cached full graph
    pub fn full(&self) -> &CitationGraph {
        &self.full
    }

    /// What the renderer should show now
    pub fn view(&self) -> &CitationGraph {
        self.view.as_ref().unwrap_or(&self.full)
    }

    /// Current query, empty after a reset
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query behind the current view, `None` while the full graph shows
    pub fn active_query(&self) -> Option<&str> {
        self.view.as_ref().map(|_| self.query.as_str())
    }

    /// Narrow the view to title matches of `query`
    pub fn filter(&mut self, query: &str) -> &CitationGraph {
        self.query = query.to_string();
        self.view = if query.trim().is_empty() {
            None
        } else {
            Some(filter_graph(&self.full, query))
        };

        debug!(query, nodes = self.view().node_count(), "Filtered citation graph");
        self.view()
    }

    /// Drop the filter and show the full graph again
    pub fn reset(&mut self) -> &CitationGraph {
        self.query.clear();
        self.view = None;
        &self.full
    }

    /// Consume the session, keeping only what it currently shows
    pub fn into_view(self) -> CitationGraph {
        match self.view {
            Some(view) => view,
            None => Arc::unwrap_or_clone(self.full),
        }
    }
}
