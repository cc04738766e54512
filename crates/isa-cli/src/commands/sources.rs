use anyhow::Context;
use isa_core::responses::SampleSourcesResponse;
use isa_query::{QueryEngine, sources_for_sample};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SampleArgs;
use crate::output::output;

/// Handle `isaslice sources`.
pub fn handle(args: &SampleArgs, engine: &QueryEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let investigation = engine
        .load(&args.dir)
        .with_context(|| format!("failed to load study from {}", args.dir.display()))?;
    let sources = sources_for_sample(&investigation, &args.sample)?;
    output(
        &SampleSourcesResponse {
            sample_name: args.sample.clone(),
            sources,
        },
        flags.format,
    )
}
