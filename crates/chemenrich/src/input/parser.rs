//! CSV/TSV reader for chemical tables.
//!
//! The delimiter comes from, in order: an explicit [`Parser::with_delimiter`],
//! the file extension (`.tsv`/`.tab`, `.csv`), or the header line.

use std::path::Path;

use tracing::debug;

use crate::error::{EnrichError, Result};
use super::source::{delimiter_for_path, DataTable};

/// Candidates for detection, in tie-break order.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Reads delimited text into a [`DataTable`].
///
/// The first record is the header. Short rows are padded with empty cells
/// and long rows truncated to the header width. A header with no data rows
/// is an empty table, not an error.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    delimiter: Option<u8>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always split on `delimiter` instead of guessing.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    /// Parse a delimited file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<DataTable> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| EnrichError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let delimiter = self
            .delimiter
            .or_else(|| delimiter_for_path(path))
            .unwrap_or_else(|| detect_delimiter(&bytes));
        let table = read_table(&bytes, delimiter)?;

        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            delimiter = %(delimiter as char).escape_default(),
            "parsed table"
        );
        Ok(table)
    }

    /// Parse in-memory delimited text.
    pub fn parse_str(&self, text: &str) -> Result<DataTable> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| detect_delimiter(text.as_bytes()));
        read_table(text.as_bytes(), delimiter)
    }
}

fn read_table(bytes: &[u8], delimiter: u8) -> Result<DataTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(EnrichError::EmptyData("no header row".to_string()));
    }

    let width = headers.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let mut row: Vec<String> = record?.iter().map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(DataTable::new(headers, rows, delimiter))
}

/// Pick the candidate that splits the header line most often.
///
/// Ties go to the earlier candidate, so tab beats comma. A header with
/// no candidate at all is a single comma-separated column.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let text = String::from_utf8_lossy(bytes);
    let Some(header) = text.lines().find(|l| !l.trim().is_empty()) else {
        return b',';
    };

    let mut best = (b',', 0);
    for &delimiter in DELIMITERS {
        let count = count_unquoted(header, delimiter as char);
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

fn count_unquoted(line: &str, delimiter: char) -> usize {
    let mut in_quotes = false;
    line.chars()
        .filter(|&c| {
            if c == '"' {
                in_quotes = !in_quotes;
            }
            c == delimiter && !in_quotes
        })
        .count()
}
