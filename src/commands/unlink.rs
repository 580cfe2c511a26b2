//! `tasklink unlink` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::links::{LinkFile, LinkTarget};

/// Execute the `unlink` command.
///
/// # Errors
///
/// Returns an error string if no link matches `identifier` or the link
/// store cannot be saved.
pub fn run(ctx: &ServiceContext, config: &Config, identifier: &str) -> Result<(), String> {
    let target = LinkTarget::parse(identifier.trim());
    let file = LinkFile::new(ctx, &config.links_file);
    let removed = file.unlink(&target).map_err(|e| e.to_string())?;
    println!("Unlinked A-{} <-> {}", removed.a_id, removed.b_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::testing::{test_context, MemFs};

    const LINKS: &str = "/p/.tasklink/links.json";

    fn config(ctx: &ServiceContext) -> Config {
        Config::load_with_env(ctx, Path::new("/p"), |_| None).unwrap()
    }

    #[test]
    fn unlink_by_either_side() {
        let fs = MemFs::new();
        let ctx = test_context(fs.clone());
        let config = config(&ctx);
        super::super::link::run(&ctx, &config, "1", "bd-1").unwrap();
        super::super::link::run(&ctx, &config, "2", "bd-2").unwrap();

        run(&ctx, &config, "a:1").unwrap();
        run(&ctx, &config, "bd-2").unwrap();

        let saved = fs.read(LINKS).unwrap();
        assert!(!saved.contains("bd-1"));
        assert!(!saved.contains("bd-2"));
    }

    #[test]
    fn unlink_miss_fails_without_writing() {
        let fs = MemFs::new();
        let ctx = test_context(fs.clone());
        let err = run(&ctx, &config(&ctx), "bd-404").unwrap_err();
        assert!(err.contains("bd-404"));
        assert!(!fs.contains(LINKS));
    }
}
