use anyhow::Context;
use isa_query::{
    QueryEngine, SummaryKind, distinct_factor_combinations, group_study_groups, study_group_sizes,
    summarize,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GroupsArgs;
use crate::output::output;

/// Handle `isaslice groups`.
pub fn handle(args: &GroupsArgs, engine: &QueryEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let investigation = engine
        .load(&args.dir)
        .with_context(|| format!("failed to load study from {}", args.dir.display()))?;

    if args.combinations {
        return output(&distinct_factor_combinations(&investigation), flags.format);
    }

    let groups = group_study_groups(&summarize(&investigation, SummaryKind::Factors));
    if args.sizes {
        return output(&study_group_sizes(&groups), flags.format);
    }
    output(&groups, flags.format)
}
