//! Beads issue records and their normalization.

use serde::Deserialize;
use serde_json::Value;

use super::priority::beads_priority;
use super::status::TaskStatus;
use super::task::{namespaced, parse_timestamp, SourceSystem, UnifiedTask};

/// Dependency edge type that encodes the parent relationship.
const PARENT_CHILD: &str = "parent-child";

/// Status Beads gives to deleted issues.
const TOMBSTONE: &str = "tombstone";

/// A Beads issue as exported to `issues.jsonl`.
#[derive(Debug, Clone, Deserialize)]
struct BeadsIssue {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<i64>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    dependencies: Vec<BeadsDependency>,
}

#[derive(Debug, Clone, Deserialize)]
struct BeadsDependency {
    depends_on_id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Returns `true` for issues Beads has deleted.
#[must_use]
pub fn is_tombstone(raw: &Value) -> bool {
    raw.get("status").and_then(Value::as_str) == Some(TOMBSTONE)
}

/// Normalizes one Beads issue.
///
/// # Errors
///
/// Returns an error when the record lacks a string `id` or has fields of
/// the wrong type.
pub fn normalize(raw: &Value) -> Result<UnifiedTask, serde_json::Error> {
    let issue = BeadsIssue::deserialize(raw)?;

    let mut task = UnifiedTask::new(SourceSystem::Beads, &issue.id, &issue.title, raw.clone());
    task.description = issue.description.filter(|d| !d.trim().is_empty());
    task.status = issue.status.as_deref().map_or(TaskStatus::Pending, TaskStatus::from_beads);
    task.priority = beads_priority(issue.priority);
    task.created_at = parse_timestamp(issue.created_at.as_deref());
    task.updated_at = parse_timestamp(issue.updated_at.as_deref());

    for dep in &issue.dependencies {
        let target = namespaced(SourceSystem::Beads, &dep.depends_on_id);
        if dep.kind.as_deref() == Some(PARENT_CHILD) {
            task.parent_id = Some(target);
        } else {
            task.dependencies.push(target);
        }
    }
    Ok(task)
}
