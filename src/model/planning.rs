//! Planning-store records: document shapes and normalization.
//!
//! The task file comes in two shapes. The tagged shape keys task lists by
//! tag name:
//!
//! ```json
//! { "master": { "tasks": [ ... ], "metadata": { ... } } }
//! ```
//!
//! The legacy shape has a single top-level list:
//!
//! ```json
//! { "tasks": [ ... ] }
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::priority::planning_priority;
use super::status::TaskStatus;
use super::task::{namespaced, parse_timestamp, SourceSystem, UnifiedTask};

/// A top-level planning task as stored on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanningRecord {
    id: Value,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    dependencies: Vec<Value>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

/// Reads a planning id from a JSON value.
///
/// Accepts integers and all-digit strings. Subtask ids such as `"7.1"`
/// are not top-level ids and yield `None`.
#[must_use]
pub fn native_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Normalizes one planning task record.
///
/// Returns `Ok(None)` for records without an integer id.
///
/// # Errors
///
/// Returns an error when the record does not have the shape of a task
/// (for example a numeric title).
pub fn normalize(raw: &Value) -> Result<Option<UnifiedTask>, serde_json::Error> {
    let record = PlanningRecord::deserialize(raw)?;
    let Some(id) = native_id(&record.id) else {
        return Ok(None);
    };

    let mut task =
        UnifiedTask::new(SourceSystem::Planning, &id.to_string(), &record.title, raw.clone());
    task.description = record.description.filter(|d| !d.trim().is_empty());
    task.status = record.status.as_deref().map_or(TaskStatus::Pending, TaskStatus::from_planning);
    task.priority = planning_priority(record.priority.as_deref());
    task.dependencies = record
        .dependencies
        .iter()
        .filter_map(|dep| match dep {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
        .map(|dep| namespaced(SourceSystem::Planning, &dep))
        .collect();
    task.created_at = parse_timestamp(record.created_at.as_deref());
    task.updated_at = parse_timestamp(record.updated_at.as_deref());
    Ok(Some(task))
}

/// Returns the task list for `tag`, if the document has one.
///
/// The legacy shape ignores `tag`.
#[must_use]
pub fn task_list<'a>(doc: &'a Value, tag: &str) -> Option<&'a Vec<Value>> {
    match doc.get("tasks") {
        Some(Value::Array(tasks)) => Some(tasks),
        _ => doc.get(tag)?.get("tasks")?.as_array(),
    }
}

/// Mutable counterpart of [`task_list`].
pub fn task_list_mut<'a>(doc: &'a mut Value, tag: &str) -> Option<&'a mut Vec<Value>> {
    if matches!(doc.get("tasks"), Some(Value::Array(_))) {
        return doc.get_mut("tasks")?.as_array_mut();
    }
    doc.get_mut(tag)?.get_mut("tasks")?.as_array_mut()
}
