//! Corpus record model
//!
//! The shape in which every corpus source hands papers to the graph pipeline.

use serde::{Deserialize, Serialize};

/// One paper as supplied by a corpus source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaperRecord {
    /// Corpus-unique identifier; records without one are malformed
    #[serde(default)]
    pub id: Option<String>,

    /// Paper title
    #[serde(default)]
    pub title: Option<String>,

    /// Publication year
    #[serde(default)]
    pub year: Option<i32>,

    /// Link to the paper, `"#"` is treated as absent
    #[serde(default)]
    pub url: Option<String>,

    /// Ids of referenced papers, in citation order; may point outside the corpus
    #[serde(default)]
    pub references: Vec<String>,
}

impl PaperRecord {
    /// Create a record with an id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// The id, if present and not blank
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_record() {
        let record: PaperRecord = serde_json::from_str(r#"{"id": "P1"}"#).unwrap();
        assert_eq!(record.key(), Some("P1"));
        assert!(record.title.is_none());
        assert!(record.references.is_empty());
    }

    #[test]
    fn test_blank_id_has_no_key() {
        let record: PaperRecord = serde_json::from_str(r#"{"id": "  ", "title": "x"}"#).unwrap();
        assert_eq!(record.key(), None);

        let record: PaperRecord = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert_eq!(record.key(), None);
    }

    #[test]
    fn test_builder_helpers() {
        let record = PaperRecord::new("P1", "Attention")
            .with_references(["P2", "P3"])
            .with_year(2017)
            .with_url("https://example.org/p1");

        assert_eq!(record.references, vec!["P2".to_string(), "P3".to_string()]);
        assert_eq!(record.year, Some(2017));
        assert_eq!(record.url.as_deref(), Some("https://example.org/p1"));
    }
}
