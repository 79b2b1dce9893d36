//! In-memory table of chemical records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{EnrichError, Result};

/// Represents parsed tabular data.
///
/// Rows keep the order they were read in. Enrichment steps never reorder,
/// merge or drop rows; they return a new table with an extra column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Build a comma-delimited table from string slices.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
            b',',
        )
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| EnrichError::missing_column(name, &self.headers))
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| {
            row.get(index)
                .map(|s| s.as_str())
                .unwrap_or("")
        })
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Return a copy of the table with `values` stored under `name`.
    ///
    /// An existing column of the same name is overwritten in place, otherwise
    /// the column is appended. `values` must have one entry per row.
    pub fn with_column(&self, name: &str, values: Vec<String>) -> Result<DataTable> {
        if values.len() != self.rows.len() {
            return Err(EnrichError::EmptyData(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }

        let mut table = self.clone();
        let existing = table.headers.iter().position(|h| h == name);
        let width = table.headers.len();

        match existing {
            Some(idx) => {
                for (row, value) in table.rows.iter_mut().zip(values) {
                    if row.len() <= idx {
                        row.resize(width, String::new());
                    }
                    row[idx] = value;
                }
            }
            None => {
                table.headers.push(name.to_string());
                for (row, value) in table.rows.iter_mut().zip(values) {
                    row.resize(width, String::new());
                    row.push(value);
                }
            }
        }

        Ok(table)
    }

    /// Return a table containing only the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> DataTable {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        DataTable::new(self.headers.clone(), rows, self.delimiter)
    }

    /// Write the table with its own delimiter.
    pub fn write_to(&self, writer: impl Write) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write the table to a file, picking the delimiter from the extension
    /// (`.tsv`/`.tab` → tab, `.csv` → comma, anything else keeps the table's).
    pub fn write_delimited(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let delimiter = delimiter_for_path(path).unwrap_or(self.delimiter);

        let file = File::create(path).map_err(|e| EnrichError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut table = self.clone();
        table.delimiter = delimiter;
        table.write_to(file)
    }
}

/// Delimiter implied by a file extension: `.tsv`/`.tab` → tab, `.csv` → comma.
pub(crate) fn delimiter_for_path(path: &Path) -> Option<u8> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "tsv" | "tab" => Some(b'\t'),
        "csv" => Some(b','),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::from_rows(
            &["CAS Number", "Chemical"],
            &[&["7732-18-5", "Water"], &["80-05-7", "Bisphenol A"]],
        )
    }

    #[test]
    fn test_with_column_appends() {
        let table = sample();
        let enriched = table
            .with_column("HMDB_id", vec!["HMDB0002111".into(), "NOT_FOUND".into()])
            .unwrap();

        assert_eq!(enriched.headers, vec!["CAS Number", "Chemical", "HMDB_id"]);
        assert_eq!(enriched.get(0, 2), Some("HMDB0002111"));
        assert_eq!(enriched.get(1, 2), Some("NOT_FOUND"));
        // Source table is untouched
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_with_column_overwrites_existing() {
        let table = sample();
        let enriched = table
            .with_column("Chemical", vec!["a".into(), "b".into()])
            .unwrap();

        assert_eq!(enriched.column_count(), 2);
        assert_eq!(enriched.column_by_name("Chemical"), Some(vec!["a", "b"]));
    }

    #[test]
    fn test_with_column_length_mismatch() {
        let table = sample();
        assert!(table.with_column("x", vec!["only one".into()]).is_err());
    }

    #[test]
    fn test_select_rows_keeps_order() {
        let table = sample();
        let subset = table.select_rows(&[1]);
        assert_eq!(subset.row_count(), 1);
        assert_eq!(subset.get(0, 1), Some("Bisphenol A"));
        assert_eq!(subset.headers, table.headers);
    }

    #[test]
    fn test_missing_column() {
        let table = sample();
        let err = table.column_index("casId_final").unwrap_err();
        assert!(matches!(err, EnrichError::MissingColumn { .. }));
        assert!(err.to_string().contains("CAS Number"));
    }

    #[test]
    fn test_write_to() {
        let table = sample();
        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "CAS Number,Chemical\n7732-18-5,Water\n80-05-7,Bisphenol A\n"
        );
    }
}
