use std::path::Path;

use anyhow::Context;
use isa_core::ParsedQuery;
use isa_core::responses::QueryResponse;
use isa_query::QueryEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::QueryArgs;
use crate::output::{output, render};

/// Read the parameters file and run its query against `source_dir`.
pub fn run_query(
    engine: &QueryEngine,
    source_dir: &Path,
    query_file: &Path,
) -> anyhow::Result<QueryResponse> {
    let text = std::fs::read_to_string(query_file)
        .with_context(|| format!("failed to read query file {}", query_file.display()))?;
    let query = ParsedQuery::from_parameters_str(&text)?;
    tracing::debug!(spec = ?query.spec, "decoded query");

    let response = engine
        .run(source_dir, &query)
        .with_context(|| format!("query against {} failed", source_dir.display()))?;
    tracing::info!(
        results = response.results.len(),
        warnings = response.warnings.len(),
        "query complete"
    );
    Ok(response)
}

/// Handle `isaslice query`.
pub fn handle(args: &QueryArgs, engine: &QueryEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run_query(engine, &args.source_dir, &args.query_file)?;

    match &args.output {
        Some(path) => {
            let rendered = render(&response, flags.format)?;
            std::fs::write(path, rendered + "\n")
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => output(&response, flags.format),
    }
}
