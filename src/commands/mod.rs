//! Command dispatch and handlers.

pub mod import;
pub mod init;
pub mod link;
pub mod links;
pub mod status;
pub mod sync;
pub mod unlink;

use std::path::Path;

use crate::adapters::beads::BeadsTracker;
use crate::adapters::planning::PlanningFile;
use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::links::LinkFile;
use crate::ports::{ExecutionSource, PlanningSource};

/// Dispatch a parsed command to its handler.
///
/// The project root comes from `TASKLINK_ROOT`, or the current directory.
///
/// # Errors
///
/// Returns an error string if the config is invalid or the selected command
/// handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = ServiceContext::live();
    dispatch_with_context(command, &ctx, &Config::root_from_env())
}

/// Dispatch a command with the given service context and project root.
fn dispatch_with_context(command: &Command, ctx: &ServiceContext, root: &Path) -> Result<(), String> {
    let config = || Config::load(ctx, root).map_err(|e| e.to_string());
    match command {
        Command::Init(args) => init::run(ctx, root, args),
        Command::Status => status::run(ctx, &config()?),
        Command::Sync(args) => sync::run(ctx, &config()?, args),
        Command::Import { dry_run } => import::run(ctx, &config()?, *dry_run),
        Command::Link { a_id, b_id } => link::run(ctx, &config()?, a_id, b_id),
        Command::Unlink { identifier } => unlink::run(ctx, &config()?, identifier),
        Command::Links { json } => links::run(ctx, &config()?, *json),
    }
}

/// Both stores and the link file for one project.
pub(crate) struct Project<'a> {
    pub planning: PlanningFile<'a>,
    pub beads: BeadsTracker<'a>,
    pub links: LinkFile<'a>,
}

impl<'a> Project<'a> {
    pub fn open(ctx: &'a ServiceContext, config: &Config) -> Self {
        Self {
            planning: PlanningFile::new(ctx, &config.planning_file, &config.tag),
            beads: BeadsTracker::new(ctx, &config.root, &config.beads_dir, &config.beads_command),
            links: LinkFile::new(ctx, &config.links_file),
        }
    }

    /// Fails when neither store is present, since there is nothing to
    /// reconcile.
    pub fn require_store(&self, config: &Config) -> Result<(), String> {
        if self.planning.exists() || self.beads.exists() {
            return Ok(());
        }
        Err(format!(
            "No planning file ({}) or beads directory ({}) found. Run `tasklink init` or set TASKLINK_ROOT.",
            config.planning_file.display(),
            config.beads_dir.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{InitArgs, SyncArgs};
    use crate::testing::{test_context, MemFs};

    #[test]
    fn init_runs_without_config() {
        let fs = MemFs::new();
        let ctx = test_context(fs.clone());
        let result = dispatch_with_context(&Command::Init(InitArgs::default()), &ctx, Path::new("/p"));
        assert!(result.is_ok());
        assert!(fs.contains("/p/.tasklink/config.yaml"));
    }

    #[test]
    fn malformed_config_is_reported() {
        let fs = MemFs::new();
        fs.insert("/p/.tasklink/config.yaml", "tag: [unterminated\n");
        let ctx = test_context(fs);
        let err = dispatch_with_context(&Command::Status, &ctx, Path::new("/p")).unwrap_err();
        assert!(err.contains("config"));
    }

    #[test]
    fn sync_without_stores_fails() {
        let ctx = test_context(MemFs::new());
        let command = Command::Sync(SyncArgs::default());
        let err = dispatch_with_context(&command, &ctx, Path::new("/p")).unwrap_err();
        assert!(err.contains("No planning file"));
    }
}
