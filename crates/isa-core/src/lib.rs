//! # isa-core
//!
//! Core types for isaslice.
//!
//! This crate provides the foundational types shared across all isaslice crates:
//! - The ISA domain model (investigation, study, assay, sample, source)
//! - `Term`, the scalar-or-ontology-annotation cell value, and its free-text parser
//! - The closed vocabulary of data-node column labels
//! - The query specification decoded from tool-parameter JSON
//! - Ordered summary records and CLI response types
//! - Cross-cutting error types

pub mod data_node;
pub mod errors;
pub mod model;
pub mod query;
pub mod record;
pub mod responses;
pub mod term;

pub use data_node::DataNode;
pub use errors::CoreError;
pub use model::{
    Assay, Characteristic, DataFile, FactorValue, Investigation, Sample, Source, Study,
};
pub use query::{FactorConstraint, ParsedQuery, QuerySpecification};
pub use record::Record;
pub use term::{OntologyAnnotation, Term};
