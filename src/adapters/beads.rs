//! Beads adapter: reads the JSONL export, writes through the `bd` CLI.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::context::ServiceContext;
use crate::model::{beads, TaskStatus, UnifiedTask};
use crate::ports::{CreateOptions, ExecutionSource, PortError};

/// File inside the Beads directory holding one issue per line.
const ISSUES_FILE: &str = "issues.jsonl";

/// Prefix `bd create` prints before the new id in text mode.
const CREATED_PREFIX: &str = "Created issue:";

/// Issue tracker backed by a `.beads` directory and the `bd` command.
pub struct BeadsTracker<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
    dir: PathBuf,
    command: String,
}

impl<'a> BeadsTracker<'a> {
    /// Binds the adapter to the Beads directory `dir` of the project at
    /// `root`, invoking `command` for mutations.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path, dir: &Path, command: &str) -> Self {
        Self {
            ctx,
            root: root.to_path_buf(),
            dir: dir.to_path_buf(),
            command: command.to_string(),
        }
    }

    fn issues_path(&self) -> PathBuf {
        self.dir.join(ISSUES_FILE)
    }

    /// Runs the tracker CLI, returning `None` when it cannot be spawned or
    /// exits non-zero.
    fn run(&self, args: &[String]) -> Option<String> {
        match self.ctx.shell.run(&self.command, args, &self.root) {
            Ok(output) if output.success() => Some(output.stdout),
            Ok(output) => {
                tracing::warn!(
                    command = %self.command,
                    exit_code = output.exit_code,
                    stderr = %output.stderr.trim(),
                    "beads command failed"
                );
                None
            }
            Err(e) => {
                tracing::warn!(command = %self.command, error = %e, "beads command unavailable");
                None
            }
        }
    }
}

/// Pulls the new issue id out of `bd create` output.
///
/// Accepts the JSON form (an object or a one-element array with an `id`)
/// and falls back to the `Created issue: <id>` text form.
fn parse_created_id(stdout: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(stdout.trim()) {
        let issue = match &value {
            Value::Array(items) => items.first()?,
            other => other,
        };
        return issue.get("id").and_then(Value::as_str).map(String::from);
    }
    stdout.lines().find_map(|line| {
        let start = line.find(CREATED_PREFIX)? + CREATED_PREFIX.len();
        line[start..].split_whitespace().next().map(String::from)
    })
}

impl ExecutionSource for BeadsTracker<'_> {
    fn exists(&self) -> bool {
        self.ctx.fs.exists(&self.dir)
    }

    fn list_unified(&self) -> Result<Vec<UnifiedTask>, PortError> {
        let path = self.issues_path();
        if !self.ctx.fs.exists(&path) {
            return Ok(Vec::new());
        }
        let contents = self.ctx.fs.read_to_string(&path)?;

        let mut tasks = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = index + 1;
            let raw: Value = serde_json::from_str(line)
                .map_err(|e| format!("malformed line {line_no} in {}: {e}", path.display()))?;
            if beads::is_tombstone(&raw) {
                continue;
            }
            let task = beads::normalize(&raw)
                .map_err(|e| format!("malformed issue on line {line_no} in {}: {e}", path.display()))?;
            tasks.push(task);
        }
        Ok(tasks)
    }

    fn create_task(&self, title: &str, options: &CreateOptions) -> Option<String> {
        let mut args = vec![
            "create".to_string(),
            title.to_string(),
            "--priority".to_string(),
            options.priority.to_string(),
        ];
        if let Some(description) = &options.description {
            args.push("--description".to_string());
            args.push(description.clone());
        }
        if let Some(external_ref) = &options.external_ref {
            args.push("--external-ref".to_string());
            args.push(external_ref.clone());
        }
        args.push("--json".to_string());

        let stdout = self.run(&args)?;
        let id = parse_created_id(&stdout);
        if id.is_none() {
            tracing::warn!(title, "could not read new issue id from beads output");
        }
        id
    }

    fn apply_status(&self, native_id: &str, status: TaskStatus) -> bool {
        let args = vec![
            "update".to_string(),
            native_id.to_string(),
            "--status".to_string(),
            status.to_beads().to_string(),
        ];
        self.run(&args).is_some()
    }
}
