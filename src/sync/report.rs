//! Human-readable sync reports.

use chrono::{DateTime, Utc};

use super::result::{Flow, SyncAction, SyncResult};

/// Formats a pass outcome, one line per action followed by totals.
#[must_use]
pub fn format_result(result: &SyncResult, verbose: bool) -> String {
    let mut lines = Vec::new();

    for link in &result.auto_linked {
        lines.push(format!("  LINK A-{} <-> {} (auto): {}", link.a_id, link.b_id, link.title));
    }
    for action in &result.created {
        let target = action.b_id.as_deref().unwrap_or("beads");
        lines.push(format!("  CREATE A-{} -> {target}: {}", action.a_id, action.title));
    }
    for action in &result.updated {
        lines.push(format!("  UPDATE {}: {}", endpoints(action), action.reason));
    }
    for conflict in &result.conflicts {
        lines.push(format!(
            "  CONFLICT A-{} <-> {}: planning={} beads={}",
            conflict.a_id, conflict.b_id, conflict.a_status, conflict.b_status
        ));
        if verbose {
            lines.push(format!(
                "    planning updated {}, beads updated {}",
                timestamp(conflict.a_updated),
                timestamp(conflict.b_updated)
            ));
        }
    }
    for skipped in &result.skipped {
        lines.push(format!(
            "  SKIP {} {}: {}",
            skipped.kind,
            endpoints(&skipped.action),
            skipped.error
        ));
        if verbose {
            lines.push(format!("    {}", skipped.action.title));
        }
    }

    if lines.is_empty() {
        lines.push("  Nothing to sync.".to_string());
    }

    let stats = &result.stats;
    lines.push(String::new());
    lines.push(format!(
        "Planning tasks: {}  Beads issues: {}  Links: {}  Unlinked: {}",
        stats.planning_tasks, stats.beads_tasks, stats.links, stats.unlinked
    ));
    if verbose {
        lines.push(format!(
            "Auto-linked: {}  Created: {}  Updated: {}  Conflicts: {}  Skipped: {}",
            result.auto_linked.len(),
            result.created.len(),
            result.updated.len(),
            result.conflicts.len(),
            result.skipped.len()
        ));
    }
    lines.join("\n")
}

fn endpoints(action: &SyncAction) -> String {
    let b = action.b_id.as_deref().unwrap_or("beads");
    match action.flow {
        Flow::AToB => format!("A-{} -> {b}", action.a_id),
        Flow::BToA => format!("{b} -> A-{}", action.a_id),
    }
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "never".to_string(), |t| t.to_rfc3339())
}
