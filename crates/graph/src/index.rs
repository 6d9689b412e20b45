//! Record index
//!
//! Id -> record lookup built once per corpus, used to resolve references
//! without scanning the corpus.

use citenet_common::PaperRecord;
use std::collections::HashMap;

/// O(1) lookup of corpus records by id
#[derive(Debug, Default)]
pub struct RecordIndex<'a> {
    by_id: HashMap<&'a str, &'a PaperRecord>,
}

impl<'a> RecordIndex<'a> {
    /// Index a corpus. The first record wins when ids repeat; records
    /// without an id are not indexed.
    pub fn build(records: &'a [PaperRecord]) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            if let Some(id) = record.key() {
                by_id.entry(id).or_insert(record);
            }
        }
        Self { by_id }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&'a PaperRecord> {
        self.by_id.get(id).copied()
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
