//! Cross-cutting error types for isaslice.
//!
//! Domain-specific errors (`TableError`, `QueryError`) are defined in their
//! respective crates. They converge in `isa-cli` through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any isaslice crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The query document is structurally missing required fields.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {name}")]
    NotFound { entity_type: String, name: String },
}
