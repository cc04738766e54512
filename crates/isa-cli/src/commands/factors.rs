use anyhow::Context;
use isa_query::{QueryEngine, factor_names, factor_values};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{FactorValuesArgs, StudyDirArgs};
use crate::output::output;

/// Handle `isaslice factors`.
pub fn handle_names(
    args: &StudyDirArgs,
    engine: &QueryEngine,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let investigation = engine
        .load(&args.dir)
        .with_context(|| format!("failed to load study from {}", args.dir.display()))?;
    output(&factor_names(&investigation), flags.format)
}

/// Handle `isaslice factor-values`.
pub fn handle_values(
    args: &FactorValuesArgs,
    engine: &QueryEngine,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let investigation = engine
        .load(&args.dir)
        .with_context(|| format!("failed to load study from {}", args.dir.display()))?;
    let values = factor_values(&investigation, &args.factor, &engine.config().tables);
    if values.is_empty() {
        tracing::warn!(factor = %args.factor, "no sample records a value for this factor");
    }
    output(&values, flags.format)
}
