//! # isa-tab
//!
//! ISA-Tab table input for isaslice.
//!
//! - [`table`]: tab-delimited tables loaded fully into memory, addressable by column
//! - [`header`]: typed column labels (`Characteristics[...]`, data nodes, ...)
//! - [`kind`]: study/assay classification of a table from its header signature
//! - [`investigation`]: the sectioned `i_*.txt` investigation file
//! - [`discover`]: locating investigation, study, and assay files in a directory
//! - [`loader`]: building the [`isa_core::Investigation`] domain model

pub mod discover;
pub mod error;
pub mod header;
pub mod investigation;
pub mod kind;
pub mod loader;
pub mod table;

pub use discover::{TableFiles, discover};
pub use error::TableError;
pub use header::{HeaderLabel, NodeKind};
pub use kind::TableKind;
pub use loader::{load_study, load_study_with};
pub use table::{FsTableSource, Table, TableSource, load_table};
