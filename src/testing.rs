//! In-memory port fakes shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use crate::context::ServiceContext;
use crate::model::{parse_timestamp, SourceSystem, TaskStatus, UnifiedTask};
use crate::ports::{
    Clock, CreateOptions, ExecutionSource, FileSystem, PlanningSource, PortError, ShellExecutor,
    ShellOutput,
};

/// 2025-03-15T14:30:00Z.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 14, 30, 0).unwrap()
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shared-handle in-memory filesystem. Clones see the same files.
#[derive(Clone, Default)]
pub struct MemFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: &str, contents: &str) {
        self.files.lock().unwrap().insert(PathBuf::from(path), contents.to_string());
    }

    pub fn read(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(Path::new(path))
    }

    pub fn snapshot(&self) -> HashMap<PathBuf, String> {
        self.files.lock().unwrap().clone()
    }
}

impl FileSystem for MemFs {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), PortError> {
        let mut files = self.files.lock().unwrap();
        let contents =
            files.remove(from).ok_or_else(|| format!("File not found: {}", from.display()))?;
        files.insert(to.to_path_buf(), contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
    }
}

/// One recorded subprocess invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellCall {
    pub program: String,
    pub args: Vec<String>,
}

/// Replies to subprocess calls from a queue. An empty queue behaves like a
/// missing binary.
#[derive(Clone, Default)]
pub struct ScriptedShell {
    replies: Arc<Mutex<VecDeque<ShellOutput>>>,
    calls: Arc<Mutex<Vec<ShellCall>>>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, exit_code: i32, stdout: &str) -> &Self {
        self.replies.lock().unwrap().push_back(ShellOutput {
            exit_code,
            stdout: stdout.to_string(),
            stderr: String::new(),
        });
        self
    }

    pub fn calls(&self) -> Vec<ShellCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ShellExecutor for ScriptedShell {
    fn run(&self, program: &str, args: &[String], _cwd: &Path) -> Result<ShellOutput, PortError> {
        self.calls
            .lock()
            .unwrap()
            .push(ShellCall { program: program.to_string(), args: args.to_vec() });
        self.replies.lock().unwrap().pop_front().ok_or_else(|| "program not found".into())
    }
}

/// Context over `fs` with a fixed clock and no subprocesses.
pub fn test_context(fs: MemFs) -> ServiceContext {
    context_with(fs, ScriptedShell::new())
}

pub fn context_with(fs: MemFs, shell: ScriptedShell) -> ServiceContext {
    ServiceContext {
        clock: Box::new(FixedClock(fixed_time())),
        fs: Box::new(fs),
        shell: Box::new(shell),
    }
}

pub fn planning_task(id: u64, title: &str, status: TaskStatus, updated: Option<&str>) -> UnifiedTask {
    let mut task = UnifiedTask::new(SourceSystem::Planning, &id.to_string(), title, json!({"id": id}));
    task.status = status;
    task.updated_at = parse_timestamp(updated);
    task
}

pub fn beads_task(id: &str, title: &str, status: TaskStatus, updated: Option<&str>) -> UnifiedTask {
    let mut task = UnifiedTask::new(SourceSystem::Beads, id, title, json!({"id": id}));
    task.status = status;
    task.updated_at = parse_timestamp(updated);
    task
}

/// Planning store fake that records status writes.
#[derive(Default)]
pub struct FakePlanning {
    pub tasks: Vec<UnifiedTask>,
    pub applied: RefCell<Vec<(u64, TaskStatus)>>,
    pub failing: HashSet<u64>,
    pub broken: bool,
}

impl FakePlanning {
    pub fn with(tasks: Vec<UnifiedTask>) -> Self {
        Self { tasks, ..Self::default() }
    }
}

impl PlanningSource for FakePlanning {
    fn exists(&self) -> bool {
        true
    }

    fn list_unified(&self) -> Result<Vec<UnifiedTask>, PortError> {
        if self.broken {
            return Err("malformed planning file".into());
        }
        Ok(self.tasks.clone())
    }

    fn apply_status(&self, native_id: u64, status: TaskStatus) -> Result<(), PortError> {
        if self.failing.contains(&native_id) {
            return Err(format!("cannot write task {native_id}").into());
        }
        self.applied.borrow_mut().push((native_id, status));
        Ok(())
    }
}

/// Beads fake that records creations and status writes.
pub struct FakeBeads {
    pub tasks: Vec<UnifiedTask>,
    pub created: RefCell<Vec<(String, CreateOptions)>>,
    pub applied: RefCell<Vec<(String, TaskStatus)>>,
    pub available: bool,
    pub rejecting: HashSet<String>,
    next_id: Cell<u32>,
}

impl FakeBeads {
    pub fn with(tasks: Vec<UnifiedTask>) -> Self {
        Self {
            tasks,
            created: RefCell::default(),
            applied: RefCell::default(),
            available: true,
            rejecting: HashSet::new(),
            next_id: Cell::new(1),
        }
    }
}

impl ExecutionSource for FakeBeads {
    fn exists(&self) -> bool {
        true
    }

    fn list_unified(&self) -> Result<Vec<UnifiedTask>, PortError> {
        Ok(self.tasks.clone())
    }

    fn create_task(&self, title: &str, options: &CreateOptions) -> Option<String> {
        if !self.available {
            return None;
        }
        self.created.borrow_mut().push((title.to_string(), options.clone()));
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Some(format!("bd-new{id}"))
    }

    fn apply_status(&self, native_id: &str, status: TaskStatus) -> bool {
        if !self.available || self.rejecting.contains(native_id) {
            return false;
        }
        self.applied.borrow_mut().push((native_id.to_string(), status));
        true
    }
}
