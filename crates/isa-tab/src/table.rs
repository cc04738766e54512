//! In-memory tables.
//!
//! A [`Table`] is read completely before it is returned, so callers never
//! observe a partial read: either every row is present or loading failed.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::TableError;
use crate::header::HeaderLabel;
use crate::kind::{TableKind, classify};

/// A tab-delimited table with rows aligned to the header by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    path: PathBuf,
    headers: Vec<String>,
    labels: Vec<HeaderLabel>,
    rows: Vec<Vec<String>>,
    kind: TableKind,
}

impl Table {
    /// Build a table from already-split cells. Cells are trimmed and every
    /// row is padded or cut to the header width.
    #[must_use]
    pub fn from_rows(path: impl Into<PathBuf>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut row: Vec<String> = row.into_iter().map(|c| c.trim().to_string()).collect();
                row.resize(width, String::new());
                row
            })
            .collect();
        let labels: Vec<HeaderLabel> = headers.iter().map(|h| HeaderLabel::parse(h)).collect();
        let kind = classify(&labels);
        Self {
            path: path.into(),
            headers,
            labels,
            rows,
            kind,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header names in file order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn labels(&self) -> &[HeaderLabel] {
        &self.labels
    }

    #[must_use]
    pub const fn kind(&self) -> TableKind {
        self.kind
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column with this exact name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Indices of every column with this exact name (ISA-Tab repeats some).
    pub fn columns_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.headers
            .iter()
            .enumerate()
            .filter(move |(_, header)| *header == name)
            .map(|(index, _)| index)
    }

    /// Cells of the first column with this name, in row order.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + use<'a>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[index].as_str()))
    }

    /// Like [`Self::column_index`] but fails with `MissingColumn`.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MissingColumn` when no header has this name.
    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }

    /// Cell at `row`, `column`; empty when either is out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Parse a tab-delimited table whose first record is the header.
///
/// # Errors
///
/// Returns `TableError::Parse` for malformed quoting or encoding and
/// `TableError::MalformedHeader` when there is no usable header row.
pub fn parse_table(path: &Path, reader: impl Read) -> Result<Table, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();
    let headers = match records.next() {
        Some(record) => record.map_err(|source| TableError::Parse {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            return Err(TableError::MalformedHeader {
                path: path.to_path_buf(),
                reason: "table has no header row".to_string(),
            });
        }
    };

    let headers: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            if index == 0 {
                header.trim_start_matches('\u{feff}').to_string()
            } else {
                header.to_string()
            }
        })
        .collect();

    if headers.iter().all(|header| header.trim().is_empty()) {
        return Err(TableError::MalformedHeader {
            path: path.to_path_buf(),
            reason: "header row is blank".to_string(),
        });
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|source| TableError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded table");
    Ok(Table::from_rows(path, headers, rows))
}

/// Load a table from disk.
///
/// # Errors
///
/// Returns `TableError::Read` when the file cannot be opened, otherwise any
/// error from [`parse_table`].
pub fn load_table(path: &Path) -> Result<Table, TableError> {
    let file = File::open(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(path, file)
}

/// Where tables come from.
pub trait TableSource {
    /// Load the table stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `TableError` when the table cannot be opened or parsed.
    fn load(&self, path: &Path) -> Result<Table, TableError>;
}

/// Reads tables from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTableSource;

impl TableSource for FsTableSource {
    fn load(&self, path: &Path) -> Result<Table, TableError> {
        load_table(path)
    }
}
