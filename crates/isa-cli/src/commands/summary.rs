use anyhow::Context;
use isa_query::{QueryEngine, summarize};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SummaryArgs;
use crate::output::output;

/// Handle `isaslice summary`.
pub fn handle(args: &SummaryArgs, engine: &QueryEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let investigation = engine
        .load(&args.dir)
        .with_context(|| format!("failed to load study from {}", args.dir.display()))?;
    let records = summarize(&investigation, args.kind.into());
    output(&records, flags.format)
}
