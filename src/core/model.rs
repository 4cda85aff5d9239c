// PeakQC - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.

use crate::util::error::TableError;
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::path::PathBuf;

// =============================================================================
// Sample record
// =============================================================================

/// One row of the QC table: a sample and the peak count reported in its log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    /// Log file base name up to the first '.'.
    pub sample_id: String,

    /// Text after the first ':' of the log content, whitespace-trimmed.
    /// Kept as text, not parsed as a number.
    pub called_peaks: String,

    /// Log file the record was read from.
    pub source: PathBuf,
}

// =============================================================================
// Duplicate handling
// =============================================================================

/// What to do when two log files yield the same sample identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the row where the identifier first appeared, take the newer value.
    #[default]
    Overwrite,
    /// Abort the run.
    Reject,
}

impl DuplicatePolicy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Reject => "reject",
        }
    }

    /// Parse a config value (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "overwrite" => Some(Self::Overwrite),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

// =============================================================================
// QC table
// =============================================================================

/// Insertion-ordered mapping from sample identifier to its record.
#[derive(Debug, Clone, Default)]
pub struct QcTable {
    rows: IndexMap<String, SampleRecord>,
}

impl QcTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: IndexMap::with_capacity(capacity),
        }
    }

    /// Add a record, keyed by its sample identifier.
    ///
    /// A new identifier is appended. An existing one is handled per `policy`:
    /// `Overwrite` replaces the value in place and returns the displaced
    /// record, `Reject` leaves the table unchanged and returns an error.
    pub fn insert(
        &mut self,
        record: SampleRecord,
        policy: DuplicatePolicy,
    ) -> Result<Option<SampleRecord>, TableError> {
        match self.rows.entry(record.sample_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(None)
            }
            Entry::Occupied(mut slot) => match policy {
                DuplicatePolicy::Overwrite => Ok(Some(slot.insert(record))),
                DuplicatePolicy::Reject => Err(TableError::DuplicateSample {
                    sample_id: record.sample_id,
                    first: slot.get().source.clone(),
                    second: record.source,
                }),
            },
        }
    }

    pub fn get(&self, sample_id: &str) -> Option<&SampleRecord> {
        self.rows.get(sample_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records in row order.
    pub fn records(&self) -> impl Iterator<Item = &SampleRecord> {
        self.rows.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, peaks: &str, source: &str) -> SampleRecord {
        SampleRecord {
            sample_id: id.to_string(),
            called_peaks: peaks.to_string(),
            source: PathBuf::from(source),
        }
    }

    fn ids(table: &QcTable) -> Vec<&str> {
        table.records().map(|r| r.sample_id.as_str()).collect()
    }

    #[test]
    fn test_rows_keep_insertion_order() {
        let mut table = QcTable::new();
        for id in ["zeta", "alpha", "mid"] {
            table
                .insert(record(id, "1", "x.log"), DuplicatePolicy::Overwrite)
                .unwrap();
        }
        assert_eq!(ids(&table), vec!["zeta", "alpha", "mid"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_overwrite_keeps_first_position_and_last_value() {
        let mut table = QcTable::new();
        let policy = DuplicatePolicy::Overwrite;
        table.insert(record("s1", "10", "s1.a.log"), policy).unwrap();
        table.insert(record("s2", "20", "s2.log"), policy).unwrap();
        let displaced = table.insert(record("s1", "99", "s1.b.log"), policy).unwrap();

        assert_eq!(displaced.map(|r| r.called_peaks), Some("10".to_string()));
        assert_eq!(ids(&table), vec!["s1", "s2"]);
        assert_eq!(table.get("s1").unwrap().called_peaks, "99");
        assert_eq!(table.get("s1").unwrap().source, PathBuf::from("s1.b.log"));
    }

    #[test]
    fn test_reject_reports_both_sources() {
        let mut table = QcTable::new();
        table
            .insert(record("s1", "10", "s1.a.log"), DuplicatePolicy::Reject)
            .unwrap();
        let err = table
            .insert(record("s1", "11", "s1.b.log"), DuplicatePolicy::Reject)
            .unwrap_err();

        match err {
            TableError::DuplicateSample {
                sample_id,
                first,
                second,
            } => {
                assert_eq!(sample_id, "s1");
                assert_eq!(first, PathBuf::from("s1.a.log"));
                assert_eq!(second, PathBuf::from("s1.b.log"));
            }
        }
        assert_eq!(table.get("s1").unwrap().called_peaks, "10");
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            DuplicatePolicy::from_str_loose("Reject"),
            Some(DuplicatePolicy::Reject)
        );
        assert_eq!(
            DuplicatePolicy::from_str_loose("overwrite"),
            Some(DuplicatePolicy::Overwrite)
        );
        assert_eq!(DuplicatePolicy::from_str_loose("merge"), None);
        assert_eq!(DuplicatePolicy::default().label(), "overwrite");
    }
}
