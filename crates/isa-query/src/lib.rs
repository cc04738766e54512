//! # isa-query
//!
//! The query and summarization engine of isaslice. Every operation works on
//! an [`isa_core::Investigation`] that has already been loaded in full.
//!
//! - [`select`]: assay and sample selection by measurement, technology,
//!   material type, and conjunctive factor-value constraints
//! - [`resolve`]: data-file lookup by scanning assay tables for data-node columns
//! - [`summary`]: per-sample factor/characteristic records, constant-column
//!   elimination, and study groups
//! - [`assemble`]: the query response document
//! - [`engine`]: the load → select → resolve → assemble pipeline

pub mod assemble;
pub mod engine;
pub mod error;
pub mod resolve;
pub mod select;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures;

pub use assemble::assemble;
pub use engine::QueryEngine;
pub use error::QueryError;
pub use resolve::{Resolution, resolve_data_files, resolve_from_paths};
pub use select::{SelectOptions, Selection, candidate_pool, select};
pub use summary::{
    SummaryKind, data_files_for_sample, distinct_factor_combinations, drop_constant_columns,
    factor_names, factor_values, group_study_groups, sources_for_sample, study_group_sizes,
    summarize, summarize_characteristics, summarize_factors, summarize_variables,
};
