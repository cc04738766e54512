//! Response assembly.

use isa_core::ParsedQuery;
use isa_core::responses::QueryResponse;

use crate::resolve::Resolution;

/// Package resolved data files into the response document.
///
/// The `query` object is echoed exactly as received. Selection warnings come
/// first, followed by the tables skipped during resolution.
#[must_use]
pub fn assemble(query: &ParsedQuery, resolution: Resolution, selection_warnings: Vec<String>) -> QueryResponse {
    let mut warnings = selection_warnings;
    warnings.extend(resolution.warnings);
    QueryResponse {
        query: query.echo.clone(),
        results: resolution.files,
        warnings,
    }
}
