//! Corpus sources
//!
//! A corpus source performs the single upstream fetch that feeds a graph
//! build. A failed fetch fails the whole build; no partial corpus is returned.

use crate::errors::{AppError, Result};
use crate::models::PaperRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Supplier of the full paper corpus
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Fetch every record of the corpus, in a stable order
    async fn fetch_corpus(&self) -> Result<Vec<PaperRecord>>;

    /// Readiness probe
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Corpus stored as a JSON array of records on disk
#[derive(Debug, Clone)]
pub struct JsonCorpus {
    path: PathBuf,
}

impl JsonCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a JSON array of records
    pub fn parse(raw: &str) -> Result<Vec<PaperRecord>> {
        serde_json::from_str(raw).map_err(|e| AppError::InvalidFormat {
            message: format!("corpus is not a JSON array of papers: {}", e),
        })
    }
}

#[async_trait]
impl CorpusSource for JsonCorpus {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_corpus(&self) -> Result<Vec<PaperRecord>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::corpus_unavailable(
                self.name(),
                format!("cannot read {}: {}", self.path.display(), e),
            )
        })?;

        let records = Self::parse(&raw)
            .map_err(|e| AppError::corpus_unavailable(self.name(), e.to_string()))?;

        info!(path = %self.path.display(), papers = records.len(), "Fetched corpus from file");
        Ok(records)
    }

    async fn ping(&self) -> Result<()> {
        tokio::fs::metadata(&self.path)
            .await
            .map(|_| ())
            .map_err(|e| AppError::corpus_unavailable(self.name(), e.to_string()))
    }
}

/// Corpus held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    records: Vec<PaperRecord>,
}

impl InMemoryCorpus {
    pub fn new(records: Vec<PaperRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CorpusSource for InMemoryCorpus {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_corpus(&self) -> Result<Vec<PaperRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corpus() {
        let raw = r#"[
            {"id": "P1", "title": "A", "references": ["P2"]},
            {"id": "P2", "title": "B", "year": 2019},
            {"title": "no id"}
        ]"#;

        let records = JsonCorpus::parse(raw).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].references, vec!["P2".to_string()]);
        assert_eq!(records[1].year, Some(2019));
        assert_eq!(records[2].key(), None);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = JsonCorpus::parse(r#"{"id": "P1"}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidFormat { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_is_corpus_unavailable() {
        let source = JsonCorpus::new("/nonexistent/citenet/corpus.json");
        let err = source.fetch_corpus().await.unwrap_err();
        assert!(matches!(err, AppError::CorpusUnavailable { .. }));
        assert!(source.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("citenet-corpus-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"[{"id": "P1", "title": "A"}]"#).await.unwrap();

        let source = JsonCorpus::new(&path);
        let records = source.fetch_corpus().await.unwrap();
        assert_eq!(records, vec![PaperRecord::new("P1", "A")]);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[test]
    fn test_in_memory_corpus() {
        let source = InMemoryCorpus::new(vec![PaperRecord::new("P1", "A")]);
        let records = tokio_test::block_on(source.fetch_corpus()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(tokio_test::block_on(source.ping()).is_ok());
    }
}
