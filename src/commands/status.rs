//! `tasklink status` command.

use std::collections::HashSet;

use super::Project;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::model::UnifiedTask;
use crate::ports::{ExecutionSource, PlanningSource};

/// Execute the `status` command.
///
/// Shows which stores are present, their task counts, the number of links,
/// and when links were last synced.
///
/// # Errors
///
/// Returns an error string if neither store exists.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    let project = Project::open(ctx, config);
    project.require_store(config)?;
    let links = project.links.load();

    let planning_ids: Option<HashSet<u64>> = if project.planning.exists() {
        match project.planning.list_unified() {
            Ok(tasks) => {
                println!(
                    "Planning:  {} ({} tasks, tag {})",
                    config.planning_file.display(),
                    tasks.len(),
                    config.tag
                );
                Some(tasks.iter().filter_map(UnifiedTask::planning_id).collect())
            }
            Err(e) => {
                println!("Planning:  {} (unreadable: {e})", config.planning_file.display());
                None
            }
        }
    } else {
        println!("Planning:  not found ({})", config.planning_file.display());
        None
    };

    if project.beads.exists() {
        match project.beads.list_unified() {
            Ok(issues) => {
                println!("Beads:     {} ({} issues)", config.beads_dir.display(), issues.len());
            }
            Err(e) => println!("Beads:     {} (unreadable: {e})", config.beads_dir.display()),
        }
    } else {
        println!("Beads:     not found ({})", config.beads_dir.display());
    }

    let auto = links.links().iter().filter(|l| l.auto_linked).count();
    println!("Links:     {} ({auto} auto, {} manual)", links.len(), links.len() - auto);
    if let Some(ids) = planning_ids {
        let unlinked = ids.iter().filter(|id| links.by_a(**id).is_none()).count();
        println!("Unlinked:  {unlinked} planning task(s)");
    }
    match links.last_sync() {
        Some(at) => println!("Last sync: {}", at.to_rfc3339()),
        None => println!("Last sync: never"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::testing::{test_context, MemFs};

    fn config(ctx: &ServiceContext) -> Config {
        Config::load_with_env(ctx, Path::new("/p"), |_| None).unwrap()
    }

    #[test]
    fn status_requires_a_store() {
        let ctx = test_context(MemFs::new());
        let err = run(&ctx, &config(&ctx)).unwrap_err();
        assert!(err.contains("tasklink init"));
    }

    #[test]
    fn status_with_planning_only() {
        let fs = MemFs::new();
        fs.insert("/p/.taskmaster/tasks/tasks.json", r#"{"tasks":[{"id":1,"title":"x"}]}"#);
        let ctx = test_context(fs.clone());
        let before = fs.snapshot();

        assert!(run(&ctx, &config(&ctx)).is_ok());
        assert_eq!(fs.snapshot(), before);
    }

    #[test]
    fn status_tolerates_unreadable_store() {
        let fs = MemFs::new();
        fs.insert("/p/.beads/issues.jsonl", "not json\n");
        let ctx = test_context(fs);
        assert!(run(&ctx, &config(&ctx)).is_ok());
    }
}
