//! Column-level CAS validation over a [`DataTable`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EnrichError, Result};
use crate::input::DataTable;

use super::number::CasNumber;

/// Outcome of filtering a table for invalid CAS numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasScan {
    /// Every value in the column is a valid CAS number.
    AllValid,
    /// Rows that failed validation, in table order with all columns.
    Invalid(DataTable),
}

impl CasScan {
    /// Whether every row passed.
    pub fn is_all_valid(&self) -> bool {
        matches!(self, CasScan::AllValid)
    }

    /// The failing rows, if any.
    pub fn invalid_rows(&self) -> Option<&DataTable> {
        match self {
            CasScan::AllValid => None,
            CasScan::Invalid(table) => Some(table),
        }
    }
}

/// Per-value verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CasCheck {
    Valid,
    BadChecksum { expected: u8, found: u8 },
    Malformed { reason: String },
}

impl CasCheck {
    /// Check a single value.
    pub fn of(value: &str) -> Self {
        match CasNumber::parse(value) {
            Ok(cas) if cas.is_valid() => CasCheck::Valid,
            Ok(cas) => CasCheck::BadChecksum {
                expected: cas.expected_check_digit(),
                found: cas.check_digit,
            },
            Err(EnrichError::InvalidCas { reason, .. }) => CasCheck::Malformed { reason },
            Err(other) => CasCheck::Malformed {
                reason: other.to_string(),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CasCheck::Valid)
    }
}

/// One row of a [`CasReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasRowCheck {
    /// Zero-based row index in the source table.
    pub row: usize,
    /// The raw cell value.
    pub input: String,
    #[serde(flatten)]
    pub check: CasCheck,
}

/// Column-wide validation detail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CasReport {
    /// Name of the checked column.
    pub column: String,
    /// Checks for every row, in row order.
    pub rows: Vec<CasRowCheck>,
    pub valid_count: usize,
    pub bad_checksum_count: usize,
    pub malformed_count: usize,
}

impl CasReport {
    /// Rows that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &CasRowCheck> {
        self.rows.iter().filter(|r| !r.check.is_valid())
    }

    /// Total number of failing rows.
    pub fn invalid_count(&self) -> usize {
        self.bad_checksum_count + self.malformed_count
    }
}

/// Validate every value of `column`, keeping per-row detail.
pub fn scan_column(table: &DataTable, column: &str) -> Result<CasReport> {
    let index = table.column_index(column)?;
    let mut report = CasReport {
        column: column.to_string(),
        ..Default::default()
    };

    for (row, value) in table.column_values(index).enumerate() {
        let check = CasCheck::of(value);
        match check {
            CasCheck::Valid => report.valid_count += 1,
            CasCheck::BadChecksum { .. } => report.bad_checksum_count += 1,
            CasCheck::Malformed { .. } => report.malformed_count += 1,
        }
        report.rows.push(CasRowCheck {
            row,
            input: value.to_string(),
            check,
        });
    }

    debug!(
        column,
        valid = report.valid_count,
        bad_checksum = report.bad_checksum_count,
        malformed = report.malformed_count,
        "scanned CAS column"
    );

    Ok(report)
}

/// Return the rows of `table` whose `column` value is not a valid CAS number.
///
/// Malformed values count as invalid; one bad cell never aborts the scan.
pub fn find_invalid(table: &DataTable, column: &str) -> Result<CasScan> {
    let report = scan_column(table, column)?;
    let failing: Vec<usize> = report.failures().map(|r| r.row).collect();

    if failing.is_empty() {
        Ok(CasScan::AllValid)
    } else {
        Ok(CasScan::Invalid(table.select_rows(&failing)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_table() -> DataTable {
        DataTable::from_rows(
            &["CAS Number", "Chemical"],
            &[
                &["7732-18-5", "Water"],
                &["80-05-7", "Bisphenol A"],
                &["123-45-6", "Fictional Compound"],
                &["50-00-0", "Formaldehyde"],
            ],
        )
    }

    #[test]
    fn test_find_invalid_example() {
        let scan = find_invalid(&example_table(), "CAS Number").unwrap();
        let invalid = scan.invalid_rows().expect("one invalid row");

        assert_eq!(invalid.row_count(), 1);
        assert_eq!(invalid.headers, vec!["CAS Number", "Chemical"]);
        assert_eq!(invalid.rows[0], vec!["123-45-6", "Fictional Compound"]);
    }

    #[test]
    fn test_all_valid() {
        let table = DataTable::from_rows(
            &["cas"],
            &[&["7732-18-5"], &["80-05-7"], &["50-00-0"]],
        );
        let scan = find_invalid(&table, "cas").unwrap();
        assert_eq!(scan, CasScan::AllValid);
        assert!(scan.invalid_rows().is_none());
    }

    #[test]
    fn test_malformed_rows_are_invalid() {
        let table = DataTable::from_rows(
            &["cas", "name"],
            &[&["", "blank"], &["7732-18-5", "Water"], &["unknown", "text"]],
        );
        let scan = find_invalid(&table, "cas").unwrap();
        let invalid = scan.invalid_rows().unwrap();

        assert_eq!(invalid.column_by_name("name"), Some(vec!["blank", "text"]));
    }

    #[test]
    fn test_missing_column() {
        let err = find_invalid(&example_table(), "casId_final").unwrap_err();
        assert!(matches!(err, EnrichError::MissingColumn { .. }));
    }

    #[test]
    fn test_scan_column_counts() {
        let mut table = example_table();
        table.rows.push(vec!["12-3x-4".into(), "Typo".into()]);
        let report = scan_column(&table, "CAS Number").unwrap();

        assert_eq!(report.valid_count, 3);
        assert_eq!(report.bad_checksum_count, 1);
        assert_eq!(report.malformed_count, 1);
        assert_eq!(report.invalid_count(), 2);
        assert_eq!(
            report.rows[2].check,
            CasCheck::BadChecksum {
                expected: 5,
                found: 6
            }
        );
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = scan_column(&example_table(), "CAS Number").unwrap();
        let json = serde_json::to_value(&report.rows[2]).unwrap();

        assert_eq!(json["row"], 2);
        assert_eq!(json["status"], "bad_checksum");
        assert_eq!(json["expected"], 5);
    }
}
