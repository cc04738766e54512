use isa_config::IsaConfig;
use isa_query::QueryEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: IsaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let engine = QueryEngine::new(config);
    match command {
        Commands::Query(args) => commands::query::handle(&args, &engine, flags),
        Commands::Factors(args) => commands::factors::handle_names(&args, &engine, flags),
        Commands::FactorValues(args) => commands::factors::handle_values(&args, &engine, flags),
        Commands::Summary(args) => commands::summary::handle(&args, &engine, flags),
        Commands::Groups(args) => commands::groups::handle(&args, &engine, flags),
        Commands::Sources(args) => commands::sources::handle(&args, &engine, flags),
        Commands::Data(args) => commands::data::handle(&args, &engine, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
