//! Profile results for columns and tables.

use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{BlotterError, Result};
use crate::input::SourceMetadata;

/// Number of distinct values retained for display in serialized reports.
const SAMPLE_VALUES: usize = 5;

/// Profile of a single column: its distinct values and derived measures.
///
/// `max_length` is computed over the distinct-value set. String length is
/// invariant under deduplication, so the result is identical to a scan over
/// the raw values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name from the header.
    pub name: String,
    /// Zero-based position in the file.
    pub position: usize,
    /// Cardinality of the distinct-value set.
    pub distinct_count: usize,
    /// Maximum character length among the distinct values.
    /// None when the column has no values at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Whether the empty string occurs as a value in this column.
    pub has_empty: bool,
    /// First few distinct values, for display.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample_values: Vec<String>,
    /// The full distinct-value set, in first-observed order. Not serialized.
    #[serde(skip)]
    pub values: IndexSet<String>,
}

impl ColumnProfile {
    /// Build a profile from a column's distinct-value set.
    pub fn from_values(name: impl Into<String>, position: usize, values: IndexSet<String>) -> Self {
        let distinct_count = values.len();
        let max_length = values.iter().map(|v| v.chars().count()).max();
        let has_empty = values.contains("");
        let sample_values: Vec<String> = values.iter().take(SAMPLE_VALUES).cloned().collect();

        Self {
            name: name.into(),
            position,
            distinct_count,
            max_length,
            has_empty,
            sample_values,
            values,
        }
    }

    /// Whether every occurrence of this column's values is distinct.
    ///
    /// `row_count` is the number of data rows the profile was computed over.
    pub fn is_unique(&self, row_count: usize) -> bool {
        row_count > 0 && self.distinct_count == row_count
    }
}

/// Profile of an entire table, one entry per header column in header order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    /// Metadata about the profiled file.
    pub source: SourceMetadata,
    /// Per-column profiles.
    pub columns: Vec<ColumnProfile>,
}

impl TableProfile {
    /// Get a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of data rows the profile was computed over.
    pub fn row_count(&self) -> usize {
        self.source.row_count
    }

    /// Render the profile as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the profile as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| BlotterError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> IndexSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_profile_from_values() {
        let profile = ColumnProfile::from_values("description", 2, set(&["xx", "x", "y"]));

        assert_eq!(profile.distinct_count, 3);
        assert_eq!(profile.max_length, Some(2));
        assert!(!profile.has_empty);
        assert_eq!(profile.sample_values, vec!["xx", "x", "y"]);
    }

    #[test]
    fn test_empty_value_set() {
        let profile = ColumnProfile::from_values("lat", 5, IndexSet::new());

        assert_eq!(profile.distinct_count, 0);
        assert_eq!(profile.max_length, None);
    }

    #[test]
    fn test_max_length_counts_characters_not_bytes() {
        let profile = ColumnProfile::from_values("description", 0, set(&["café"]));

        assert_eq!(profile.max_length, Some(4));
    }

    #[test]
    fn test_report_serializes_without_full_value_set() {
        let source = SourceMetadata::new(
            std::path::PathBuf::from("boston.csv"),
            "sha256:abc".to_string(),
            10,
            "csv".to_string(),
            3,
            1,
        );
        let profile = TableProfile {
            source,
            columns: vec![ColumnProfile::from_values("day", 0, set(&["Sunday", "Monday"]))],
        };

        let json = profile.to_json().unwrap();
        assert!(json.contains("\"distinct_count\": 2"));
        assert!(json.contains("\"sample_values\""));
        assert!(!json.contains("\"values\""));
    }

    #[test]
    fn test_is_unique() {
        let profile = ColumnProfile::from_values("incident_number", 0, set(&["1", "2", "3"]));

        assert!(profile.is_unique(3));
        assert!(!profile.is_unique(4));
        assert!(!profile.is_unique(0));
    }
}
