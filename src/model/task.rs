//! The unified task record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::priority::DEFAULT_PRIORITY;
use super::status::TaskStatus;

/// Which store a task came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSystem {
    /// The planning store (Source A).
    Planning,
    /// The Beads issue tracker (Source B).
    Beads,
}

impl SourceSystem {
    /// Namespace prefix used in unified ids.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Planning => "a",
            Self::Beads => "b",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planning => f.write_str("planning"),
            Self::Beads => f.write_str("beads"),
        }
    }
}

/// Provenance of a unified task: the store and the record it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRef {
    /// Originating store.
    pub system: SourceSystem,
    /// Id as the store spells it.
    pub native_id: String,
    /// The native record, untouched.
    pub raw: Value,
}

/// Canonical cross-store task record.
///
/// `id` encodes exactly one `(system, native_id)` pair and never changes;
/// tasks from different stores are only related through a link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedTask {
    /// Namespaced id, `a:<native>` or `b:<native>`.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Free-form description, when the store has one.
    pub description: Option<String>,
    /// Normalized status.
    pub status: TaskStatus,
    /// Normalized priority, 0 (highest) to 4.
    pub priority: u8,
    /// Namespaced id of the parent task.
    pub parent_id: Option<String>,
    /// Namespaced ids of tasks this one depends on.
    pub dependencies: Vec<String>,
    /// Creation time, if recorded.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time, if recorded.
    pub updated_at: Option<DateTime<Utc>>,
    /// Exactly one entry for tasks produced by an adapter.
    pub sources: Vec<SourceRef>,
}

impl UnifiedTask {
    /// Creates a pending, default-priority task owned by `system`.
    #[must_use]
    pub fn new(system: SourceSystem, native_id: &str, title: &str, raw: Value) -> Self {
        Self {
            id: namespaced(system, native_id),
            title: title.to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: DEFAULT_PRIORITY,
            parent_id: None,
            dependencies: Vec::new(),
            created_at: None,
            updated_at: None,
            sources: vec![SourceRef { system, native_id: native_id.to_string(), raw }],
        }
    }

    /// The store this task was read from.
    #[must_use]
    pub fn system(&self) -> SourceSystem {
        self.sources.first().map_or(SourceSystem::Planning, |s| s.system)
    }

    /// The id as the originating store spells it.
    #[must_use]
    pub fn native_id(&self) -> &str {
        self.sources.first().map_or("", |s| s.native_id.as_str())
    }

    /// Numeric planning id, for tasks read from the planning store.
    #[must_use]
    pub fn planning_id(&self) -> Option<u64> {
        match self.system() {
            SourceSystem::Planning => self.native_id().parse().ok(),
            SourceSystem::Beads => None,
        }
    }

    /// `updated_at`, with a missing timestamp treated as the oldest
    /// representable instant.
    #[must_use]
    pub fn updated_or_epoch(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Builds a namespaced unified id.
#[must_use]
pub fn namespaced(system: SourceSystem, native_id: &str) -> String {
    format!("{}:{native_id}", system.prefix())
}

/// Parses an RFC 3339 timestamp. Unparsable input counts as absent.
#[must_use]
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
