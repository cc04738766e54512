//! Query engine error types.

use isa_core::CoreError;
use isa_tab::TableError;

/// Errors from selection, summarization, and the query pipeline.
///
/// Per-table failures while resolving data files are not errors; they are
/// reported as warnings on the response.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A table needed to build the study could not be loaded.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// A factor constraint names a factor that no sample carries. Raised
    /// only in strict mode.
    #[error("factor '{factor_name}' is not defined on any sample")]
    AmbiguousFactor { factor_name: String },
}
