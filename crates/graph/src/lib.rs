//! Citenet graph core
//!
//! Turns a flat paper corpus into a laid-out citation graph:
//! - Record index for O(1) reference resolution
//! - Graph construction with validated edges
//! - Node and edge deduplication
//! - Connected/isolated classification
//! - Size-dependent 2D layout (circle or jittered grid)
//! - Induced-subgraph title filtering over a cached graph
//! - Papers-per-year trends over the same corpus

pub mod builder;
pub mod connectivity;
pub mod dedup;
pub mod filter;
pub mod index;
pub mod layout;
pub mod pipeline;
pub mod session;
pub mod trends;
mod types;

pub use builder::{BuildOutput, GraphBuilder};
pub use filter::filter_graph;
pub use index::RecordIndex;
pub use layout::{LayoutEngine, LayoutStrategy};
pub use pipeline::{CitationPipeline, GraphSnapshot};
pub use session::CitationSession;
pub use trends::{papers_per_year, YearCount};
pub use types::{CitationGraph, Edge, GraphStats, Node};
