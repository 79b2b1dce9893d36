//! Unified outcome of an external lookup.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::DataTable;

use super::fetch::FetchError;

/// Cell text written for [`LookupResult::NotFound`].
pub const NOT_FOUND: &str = "NOT_FOUND";
/// Cell text written for [`LookupResult::Timeout`].
pub const TIMEOUT: &str = "TIMEOUT";
/// Cell text written for [`LookupResult::NotAttempted`].
pub const NOT_ATTEMPTED: &str = "NA";
/// Prefix of the cell text written for [`LookupResult::Error`].
pub const ERROR_PREFIX: &str = "Error: ";

/// Not-found markers written by older enrichment runs.
const LEGACY_NOT_FOUND: &[&str] = &["HMDB ID not found", "Not Found"];

/// Result of looking one value up in an external database.
///
/// A result is terminal: nothing is retried once it has been produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LookupResult {
    /// The database returned a value.
    Found(String),
    /// The page loaded but did not contain the expected marker.
    NotFound,
    /// The request exceeded its timeout.
    Timeout,
    /// The request or response failed; carries the failure description.
    Error(String),
    /// No request was issued for this row.
    NotAttempted,
}

impl LookupResult {
    /// Map a failed fetch onto a lookup outcome.
    pub fn from_fetch_error(error: &FetchError) -> Self {
        match error {
            FetchError::Timeout { .. } => LookupResult::Timeout,
            other => LookupResult::Error(other.to_string()),
        }
    }

    /// Read back a cell written by [`LookupResult::to_cell`].
    pub fn from_cell(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() || cell == NOT_ATTEMPTED {
            return LookupResult::NotAttempted;
        }
        if cell == NOT_FOUND || LEGACY_NOT_FOUND.contains(&cell) {
            return LookupResult::NotFound;
        }
        if cell == TIMEOUT {
            return LookupResult::Timeout;
        }
        if let Some(message) = cell.strip_prefix(ERROR_PREFIX) {
            return LookupResult::Error(message.to_string());
        }
        LookupResult::Found(cell.to_string())
    }

    /// Text stored in a table cell.
    pub fn to_cell(&self) -> String {
        match self {
            LookupResult::Found(value) => value.clone(),
            LookupResult::NotFound => NOT_FOUND.to_string(),
            LookupResult::Timeout => TIMEOUT.to_string(),
            LookupResult::Error(message) => format!("{}{}", ERROR_PREFIX, message),
            LookupResult::NotAttempted => NOT_ATTEMPTED.to_string(),
        }
    }

    /// The found value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            LookupResult::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found(_))
    }

    /// Whether a request was issued for this slot.
    pub fn was_attempted(&self) -> bool {
        !matches!(self, LookupResult::NotAttempted)
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cell())
    }
}

/// Cell text for a column of results.
pub(crate) fn to_cells(results: &[LookupResult]) -> Vec<String> {
    results.iter().map(LookupResult::to_cell).collect()
}

/// Counts of lookup outcomes for one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupSummary {
    /// What was looked up (e.g. "hmdb_id", "pubmed_hits").
    pub step: String,
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub timeout: usize,
    pub error: usize,
    pub not_attempted: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl LookupSummary {
    /// Tally a finished batch.
    pub fn from_results(
        step: impl Into<String>,
        results: &[LookupResult],
        started_at: DateTime<Utc>,
    ) -> Self {
        let mut summary = Self {
            step: step.into(),
            total: results.len(),
            found: 0,
            not_found: 0,
            timeout: 0,
            error: 0,
            not_attempted: 0,
            started_at,
            finished_at: Utc::now(),
        };

        for result in results {
            match result {
                LookupResult::Found(_) => summary.found += 1,
                LookupResult::NotFound => summary.not_found += 1,
                LookupResult::Timeout => summary.timeout += 1,
                LookupResult::Error(_) => summary.error += 1,
                LookupResult::NotAttempted => summary.not_attempted += 1,
            }
        }

        summary
    }

    /// Tally an output column written by an enrichment step.
    pub fn from_column(
        step: impl Into<String>,
        table: &DataTable,
        column: &str,
        started_at: DateTime<Utc>,
    ) -> Result<Self> {
        let index = table.column_index(column)?;
        let results: Vec<LookupResult> = table
            .column_values(index)
            .map(LookupResult::from_cell)
            .collect();
        Ok(Self::from_results(step, &results, started_at))
    }

    /// Rows whose lookup ended in a timeout or error.
    pub fn failed(&self) -> usize {
        self.timeout + self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_sentinels() {
        assert_eq!(LookupResult::Found("HMDB0002111".into()).to_cell(), "HMDB0002111");
        assert_eq!(LookupResult::NotFound.to_cell(), "NOT_FOUND");
        assert_eq!(LookupResult::Timeout.to_cell(), "TIMEOUT");
        assert_eq!(LookupResult::NotAttempted.to_cell(), "NA");
        assert_eq!(
            LookupResult::Error("HTTP 503".into()).to_cell(),
            "Error: HTTP 503"
        );
    }

    #[test]
    fn test_from_cell() {
        assert_eq!(LookupResult::from_cell("NOT_FOUND"), LookupResult::NotFound);
        assert_eq!(LookupResult::from_cell("HMDB ID not found"), LookupResult::NotFound);
        assert_eq!(LookupResult::from_cell("TIMEOUT"), LookupResult::Timeout);
        assert_eq!(LookupResult::from_cell(""), LookupResult::NotAttempted);
        assert_eq!(LookupResult::from_cell("NA"), LookupResult::NotAttempted);
        assert_eq!(
            LookupResult::from_cell("Error: connection refused"),
            LookupResult::Error("connection refused".into())
        );
        assert_eq!(
            LookupResult::from_cell(" HMDB0001875 "),
            LookupResult::Found("HMDB0001875".into())
        );
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            LookupResult::Found("12".into()),
            LookupResult::NotFound,
            LookupResult::Timeout,
            LookupResult::Error("boom".into()),
            LookupResult::NotAttempted,
            LookupResult::Found("3".into()),
        ];
        let summary = LookupSummary::from_results("pubmed_hits", &results, Utc::now());

        assert_eq!(summary.total, 6);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.failed(), 2);
        assert_eq!(summary.not_attempted, 1);
        assert!(summary.finished_at >= summary.started_at);
    }

    #[test]
    fn test_summary_from_column() {
        let table = DataTable::from_rows(
            &["cas", "HMDB_id"],
            &[
                &["7732-18-5", "HMDB0002111"],
                &["123-45-6", "NOT_FOUND"],
                &["50-00-0", "Error: HTTP 503 for url: x"],
            ],
        );
        let summary = LookupSummary::from_column("hmdb_id", &table, "HMDB_id", Utc::now()).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.found, 1);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.error, 1);
        assert!(LookupSummary::from_column("hmdb_id", &table, "missing", Utc::now()).is_err());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(LookupResult::Found("42".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "found", "value": "42"}));

        let json = serde_json::to_value(LookupResult::Timeout).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "timeout"}));
    }
}
