//! `tasklink import` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::sync::{Direction, SyncOptions};

/// Execute the `import` command: a planning-to-Beads only sync, which
/// creates an issue for every unlinked planning task.
///
/// # Errors
///
/// Returns an error string if neither store exists, a store cannot be read,
/// or the link store cannot be saved.
pub fn run(ctx: &ServiceContext, config: &Config, dry_run: bool) -> Result<(), String> {
    let options = SyncOptions { dry_run, direction: Direction::AToB, verbose: false };
    super::sync::execute(ctx, config, &options)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::testing::{context_with, MemFs, ScriptedShell};

    #[test]
    fn import_creates_issues_for_unlinked_tasks() {
        let fs = MemFs::new();
        fs.insert(
            "/p/.taskmaster/tasks/tasks.json",
            r#"{"tasks":[{"id":4,"title":"Add cache","priority":"high"}]}"#,
        );
        let shell = ScriptedShell::new();
        shell.reply(0, r#"{"id":"bd-9","title":"A-4: Add cache"}"#);
        let ctx = context_with(fs.clone(), shell.clone());
        let config = Config::load_with_env(&ctx, Path::new("/p"), |_| None).unwrap();

        run(&ctx, &config, false).unwrap();

        let calls = shell.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args[0], "create");
        assert_eq!(calls[0].args[1], "A-4: Add cache");
        let saved = fs.read("/p/.tasklink/links.json").unwrap();
        assert!(saved.contains("\"bId\": \"bd-9\""));
    }

    #[test]
    fn import_dry_run_does_not_call_beads() {
        let fs = MemFs::new();
        fs.insert("/p/.taskmaster/tasks/tasks.json", r#"{"tasks":[{"id":4,"title":"Add cache"}]}"#);
        let shell = ScriptedShell::new();
        let ctx = context_with(fs.clone(), shell.clone());
        let config = Config::load_with_env(&ctx, Path::new("/p"), |_| None).unwrap();

        run(&ctx, &config, true).unwrap();

        assert!(shell.calls().is_empty());
        assert!(!fs.contains("/p/.tasklink/links.json"));
    }
}
