use isa_core::QuerySpecification;
use isa_core::responses::QueryResponse;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::output::output;

/// Handle `isaslice schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.target {
        SchemaTarget::Query => schema_for!(QuerySpecification),
        SchemaTarget::Response => schema_for!(QueryResponse),
    };
    output(&schema, flags.format)
}
