//! Planning-store adapter over the JSON task file.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::context::ServiceContext;
use crate::model::{planning, TaskStatus, UnifiedTask};
use crate::ports::{PlanningSource, PortError};

/// Reads and writes the planning task file for one tag.
pub struct PlanningFile<'a> {
    ctx: &'a ServiceContext,
    path: PathBuf,
    tag: String,
}

impl<'a> PlanningFile<'a> {
    /// Binds the adapter to the task file at `path` and the active `tag`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, path: &Path, tag: &str) -> Self {
        Self { ctx, path: path.to_path_buf(), tag: tag.to_string() }
    }

    fn read_document(&self) -> Result<Value, PortError> {
        let contents = self.ctx.fs.read_to_string(&self.path)?;
        let doc: Value = serde_json::from_str(&contents)
            .map_err(|e| format!("malformed planning file {}: {e}", self.path.display()))?;
        if !doc.is_object() {
            return Err(format!("malformed planning file {}: expected an object", self.path.display())
                .into());
        }
        Ok(doc)
    }
}

impl PlanningSource for PlanningFile<'_> {
    fn exists(&self) -> bool {
        self.ctx.fs.exists(&self.path)
    }

    fn list_unified(&self) -> Result<Vec<UnifiedTask>, PortError> {
        if !self.exists() {
            return Ok(Vec::new());
        }
        let doc = self.read_document()?;
        let Some(records) = planning::task_list(&doc, &self.tag) else {
            tracing::warn!(path = %self.path.display(), tag = %self.tag, "no task list for tag");
            return Ok(Vec::new());
        };

        let mut tasks = Vec::with_capacity(records.len());
        for (index, raw) in records.iter().enumerate() {
            match planning::normalize(raw) {
                Ok(Some(task)) => tasks.push(task),
                Ok(None) => tracing::debug!(index, "skipping planning task without integer id"),
                Err(e) => {
                    return Err(format!(
                        "malformed task #{index} in {}: {e}",
                        self.path.display()
                    )
                    .into())
                }
            }
        }
        Ok(tasks)
    }

    fn apply_status(&self, native_id: u64, status: TaskStatus) -> Result<(), PortError> {
        let mut doc = self.read_document()?;
        let records = planning::task_list_mut(&mut doc, &self.tag)
            .ok_or_else(|| format!("no task list for tag {} in {}", self.tag, self.path.display()))?;
        let record = records
            .iter_mut()
            .find(|raw| raw.get("id").and_then(planning::native_id) == Some(native_id))
            .ok_or_else(|| format!("planning task {native_id} not found"))?;

        record["status"] = Value::from(status.to_planning());
        record["updatedAt"] = Value::from(self.ctx.clock.now().to_rfc3339());

        let mut json = serde_json::to_string_pretty(&doc)?;
        json.push('\n');
        self.ctx.fs.write(&self.path, &json)
    }
}
