//! Publication trends
//!
//! Papers per publication year over the same corpus the graph is built from.
//! Records without an id, and repeats of an id already seen, are not counted.

use citenet_common::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Number of papers published in one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Paper counts per year, ascending by year; papers without a year are skipped
pub fn papers_per_year(records: &[PaperRecord]) -> Vec<YearCount> {
    let mut seen = HashSet::new();
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();

    for record in records {
        let Some(id) = record.key() else { continue };
        if !seen.insert(id) {
            continue;
        }
        if let Some(year) = record.year {
            *counts.entry(year).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sorted_by_year() {
        let records = vec![
            PaperRecord::new("P1", "A").with_year(2019),
            PaperRecord::new("P2", "B").with_year(2017),
            PaperRecord::new("P3", "C").with_year(2019),
            PaperRecord::new("P4", "D"),
        ];

        assert_eq!(
            papers_per_year(&records),
            vec![
                YearCount { year: 2017, count: 1 },
                YearCount { year: 2019, count: 2 },
            ]
        );
    }

    #[test]
    fn test_duplicates_and_anonymous_records_are_skipped() {
        let records = vec![
            PaperRecord::new("P1", "A").with_year(2020),
            PaperRecord::new("P1", "A again").with_year(2021),
            PaperRecord {
                year: Some(2020),
                ..PaperRecord::default()
            },
        ];

        assert_eq!(papers_per_year(&records), vec![YearCount { year: 2020, count: 1 }]);
    }

    #[test]
    fn test_no_years_is_empty() {
        let records = vec![PaperRecord::new("P1", "A"), PaperRecord::new("P2", "B")];
        assert!(papers_per_year(&records).is_empty());
        assert!(papers_per_year(&[]).is_empty());
    }
}
