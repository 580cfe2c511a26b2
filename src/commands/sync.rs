//! `tasklink sync` command.

use super::Project;
use crate::cli::SyncArgs;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::sync::{format_result, Direction, Reconciler, SyncOptions};

/// Execute the `sync` command.
///
/// # Errors
///
/// Returns an error string if neither store exists, a store cannot be read,
/// or the link store cannot be saved.
pub fn run(ctx: &ServiceContext, config: &Config, args: &SyncArgs) -> Result<(), String> {
    let direction = if args.a_to_b {
        Direction::AToB
    } else if args.b_to_a {
        Direction::BToA
    } else {
        Direction::Bidirectional
    };
    let options = SyncOptions { dry_run: args.dry_run, direction, verbose: args.verbose };
    execute(ctx, config, &options)
}

/// Runs one pass with `options` and prints the report.
pub(crate) fn execute(
    ctx: &ServiceContext,
    config: &Config,
    options: &SyncOptions,
) -> Result<(), String> {
    let project = Project::open(ctx, config);
    project.require_store(config)?;

    let reconciler = Reconciler::new(&project.planning, &project.beads, ctx.clock.as_ref());
    let result = reconciler.sync(&project.links, options).map_err(|e| e.to_string())?;

    if options.dry_run {
        println!("Dry run — would perform:");
    } else {
        println!("Sync complete ({}):", options.direction);
    }
    println!("{}", format_result(&result, options.verbose));
    Ok(())
}
