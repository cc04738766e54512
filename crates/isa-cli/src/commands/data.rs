use anyhow::Context;
use isa_query::{QueryEngine, data_files_for_sample};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SampleArgs;
use crate::output::output;

/// Handle `isaslice data`.
pub fn handle(args: &SampleArgs, engine: &QueryEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let investigation = engine
        .load(&args.dir)
        .with_context(|| format!("failed to load study from {}", args.dir.display()))?;
    let files = data_files_for_sample(&investigation, &args.sample)?;
    output(&files, flags.format)
}
