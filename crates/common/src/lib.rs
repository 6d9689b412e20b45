//! Citenet Common Library
//!
//! Shared code for the citenet crates including:
//! - Corpus record model
//! - Corpus sources (database, JSON file, in-memory)
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod corpus;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use config::{AppConfig, LayoutConfig};
pub use corpus::{CorpusSource, InMemoryCorpus, JsonCorpus};
pub use db::Repository;
pub use errors::{AppError, Result};
pub use models::PaperRecord;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
