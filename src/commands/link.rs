//! `tasklink link` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::links::{parse_planning_id, LinkError, LinkFile};

/// Execute the `link` command.
///
/// `a_id` may be bare digits or carry an `a:`/`A-` prefix. The link is saved
/// immediately.
///
/// # Errors
///
/// Returns an error string if `a_id` is not a planning id, either side is
/// already linked, or the link store cannot be saved.
pub fn run(ctx: &ServiceContext, config: &Config, a_id: &str, b_id: &str) -> Result<(), String> {
    let id = parse_planning_id(a_id)
        .ok_or_else(|| LinkError::InvalidPlanningId(a_id.to_string()).to_string())?;
    let b_id = b_id.trim();
    if b_id.is_empty() {
        return Err("Beads issue id must not be empty".to_string());
    }

    let file = LinkFile::new(ctx, &config.links_file);
    let link = file.link(id, b_id).map_err(|e| e.to_string())?;
    println!("Linked A-{} <-> {}", link.a_id, link.b_id);
    Ok(())
}
