//! `tasklink init` command.

use std::path::Path;

use crate::cli::InitArgs;
use crate::config::{Config, FileConfig, CONFIG_FILE};
use crate::context::ServiceContext;
use crate::links::LinkStore;

const DOCS_FILE: &str = "docs/tasklink.md";
const CLAUDE_FILE: &str = "CLAUDE.md";
const SECTION_START: &str = "<!-- tasklink:start -->";
const SECTION_END: &str = "<!-- tasklink:end -->";

const CONFIG_HEADER: &str = "# tasklink configuration. Relative paths resolve against the project root.\n";

const DOCS: &str = "# Working with tasklink

tasklink keeps the planning task file (`.taskmaster/tasks/tasks.json`) and the
Beads tracker (`.beads/`) in step. Each planning task is linked to at most one
Beads issue, and the links live in `.tasklink/links.json`.

## Daily loop

1. Plan in the task file as usual.
2. Run `tasklink import` to create a Beads issue for every unlinked task.
   New issues are titled `A-<id>: <title>`.
3. Work from Beads (`bd ready`, `bd update <id> --status in_progress`).
4. Run `tasklink sync` to carry status changes across. The side with the newer
   update time wins. When both sides changed at the same instant, tasklink
   reports a conflict and changes nothing.

Use `--dry-run` on `sync` and `import` to preview, and `--a-to-b` or `--b-to-a`
to restrict a sync to one direction.

## Linking by hand

Issues whose title starts with `A-<id>:`, `[A-<id>]`, or `a:<id>`, or that
contain `(A-<id>)`, are linked automatically on the next sync. Otherwise:

    tasklink link 7 bd-a1b2
    tasklink unlink a:7
    tasklink links
";

const CLAUDE_SECTION: &str = "## Task tracking (tasklink)

- Planning lives in `.taskmaster/tasks/tasks.json`; execution lives in Beads.
- Run `tasklink sync` after changing task status in either place.
- Run `tasklink status` to see what is linked. See `docs/tasklink.md`.
";

/// Execute the `init` command.
///
/// Writes the default config and an empty link store, plus the workflow guide
/// with `--docs` and a `CLAUDE.md` section with `--claude`. Existing files
/// are kept unless `--force`; the link store is never replaced.
///
/// # Errors
///
/// Returns an error string if a file cannot be written or the existing
/// config is invalid.
pub fn run(ctx: &ServiceContext, root: &Path, args: &InitArgs) -> Result<(), String> {
    let config_path = root.join(CONFIG_FILE);
    if args.force || !ctx.fs.exists(&config_path) {
        let yaml = serde_yaml::to_string(&FileConfig::defaults())
            .map_err(|e| format!("Failed to serialize config: {e}"))?;
        write(ctx, &config_path, &format!("{CONFIG_HEADER}{yaml}"))?;
    } else {
        println!("Kept existing {}", config_path.display());
    }

    let config = Config::load(ctx, root).map_err(|e| e.to_string())?;
    if ctx.fs.exists(&config.links_file) {
        println!("Kept existing {}", config.links_file.display());
    } else {
        let json = LinkStore::new().to_json().map_err(|e| format!("Failed to serialize links: {e}"))?;
        write(ctx, &config.links_file, &json)?;
    }

    if args.docs {
        let docs_path = root.join(DOCS_FILE);
        if args.force || !ctx.fs.exists(&docs_path) {
            write(ctx, &docs_path, DOCS)?;
        } else {
            println!("Kept existing {}", docs_path.display());
        }
    }

    if args.claude {
        update_claude_file(ctx, &root.join(CLAUDE_FILE), args.force)?;
    }
    Ok(())
}

fn write(ctx: &ServiceContext, path: &Path, contents: &str) -> Result<(), String> {
    ctx.fs
        .write(path, contents)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn update_claude_file(ctx: &ServiceContext, path: &Path, force: bool) -> Result<(), String> {
    let section = format!("{SECTION_START}\n{CLAUDE_SECTION}{SECTION_END}\n");
    if !ctx.fs.exists(path) {
        return write(ctx, path, &section);
    }

    let existing = ctx
        .fs
        .read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    match replace_section(&existing, &section) {
        Some(_) if !force => {
            println!("Kept existing tasklink section in {}", path.display());
            Ok(())
        }
        Some(updated) => write(ctx, path, &updated),
        None => {
            let separator = match existing.as_str() {
                "" => "",
                text if text.ends_with('\n') => "\n",
                _ => "\n\n",
            };
            write(ctx, path, &format!("{existing}{separator}{section}"))
        }
    }
}

/// Swaps the marked section for `section`, or `None` if there is none.
fn replace_section(existing: &str, section: &str) -> Option<String> {
    let start = existing.find(SECTION_START)?;
    let end_marker = start + existing[start..].find(SECTION_END)?;
    let mut end = end_marker + SECTION_END.len();
    if existing[end..].starts_with('\n') {
        end += 1;
    }
    Some(format!("{}{section}{}", &existing[..start], &existing[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_context, MemFs};

    fn args(docs: bool, claude: bool, force: bool) -> InitArgs {
        InitArgs { docs, claude, force }
    }

    #[test]
    fn init_writes_config_and_empty_store() {
        let fs = MemFs::new();
        let ctx = test_context(fs.clone());

        run(&ctx, Path::new("/p"), &args(false, false, false)).unwrap();

        let yaml = fs.read("/p/.tasklink/config.yaml").unwrap();
        assert!(yaml.contains("tag: master"));
        let store = LinkStore::from_json(&fs.read("/p/.tasklink/links.json").unwrap()).unwrap();
        assert!(store.is_empty());
        assert!(store.last_sync().is_none());
        assert!(!fs.contains("/p/docs/tasklink.md"));
    }

    #[test]
    fn init_keeps_existing_files_without_force() {
        let fs = MemFs::new();
        fs.insert("/p/.tasklink/config.yaml", "tag: feature\n");
        fs.insert("/p/docs/tasklink.md", "custom");
        let ctx = test_context(fs.clone());

        run(&ctx, Path::new("/p"), &args(true, false, false)).unwrap();

        assert_eq!(fs.read("/p/.tasklink/config.yaml").unwrap(), "tag: feature\n");
        assert_eq!(fs.read("/p/docs/tasklink.md").unwrap(), "custom");
    }

    #[test]
    fn force_rewrites_config_but_not_links() {
        let fs = MemFs::new();
        fs.insert("/p/.tasklink/config.yaml", "tag: feature\n");
        fs.insert("/p/.tasklink/links.json", "{\"version\":1,\"links\":[]}");
        let ctx = test_context(fs.clone());

        run(&ctx, Path::new("/p"), &args(false, false, true)).unwrap();

        assert!(fs.read("/p/.tasklink/config.yaml").unwrap().contains("tag: master"));
        assert_eq!(fs.read("/p/.tasklink/links.json").unwrap(), "{\"version\":1,\"links\":[]}");
    }

    #[test]
    fn claude_section_is_appended_once() {
        let fs = MemFs::new();
        fs.insert("/p/CLAUDE.md", "# Project\n");
        let ctx = test_context(fs.clone());

        run(&ctx, Path::new("/p"), &args(false, true, false)).unwrap();
        run(&ctx, Path::new("/p"), &args(false, true, true)).unwrap();

        let contents = fs.read("/p/CLAUDE.md").unwrap();
        assert!(contents.starts_with("# Project\n"));
        assert_eq!(contents.matches(SECTION_START).count(), 1);
        assert_eq!(contents.matches(SECTION_END).count(), 1);
    }

    #[test]
    fn replace_section_keeps_surrounding_text() {
        let existing = format!("before\n{SECTION_START}\nold\n{SECTION_END}\nafter\n");
        let updated = replace_section(&existing, "NEW\n").unwrap();
        assert_eq!(updated, "before\nNEW\nafter\n");
        assert!(replace_section("no markers", "NEW\n").is_none());
    }
}
