//! Table input error types.

use std::path::PathBuf;

use crate::kind::TableKind;

/// Errors raised while opening, parsing, or interpreting ISA-Tab files.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid tab-delimited text.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The header row is absent or unusable.
    #[error("malformed header in {}: {reason}", path.display())]
    MalformedHeader { path: PathBuf, reason: String },

    /// A column the operation depends on is not in the header.
    #[error("{} has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// The header signature does not match the role the table was referenced in.
    #[error("{} looks like a {found} table, expected a {expected} table", path.display())]
    UnexpectedKind {
        path: PathBuf,
        expected: TableKind,
        found: TableKind,
    },

    /// No investigation file in the source directory.
    #[error("no investigation file matching '{pattern}' in {}", dir.display())]
    MissingInvestigation { dir: PathBuf, pattern: String },

    /// The investigation file is readable but does not describe a study.
    #[error("malformed investigation file {}: {reason}", path.display())]
    MalformedInvestigation { path: PathBuf, reason: String },

    /// A configured file-name pattern is not a valid glob.
    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
