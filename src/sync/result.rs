//! Options and outcome of a sync pass.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::model::TaskStatus;

/// Which way status changes may flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Both ways.
    #[default]
    Bidirectional,
    /// Planning store to Beads only, including creating missing issues.
    AToB,
    /// Beads to planning store only.
    BToA,
}

impl Direction {
    /// Whether the planning-to-Beads pass runs.
    #[must_use]
    pub fn pushes_to_beads(self) -> bool {
        !matches!(self, Self::BToA)
    }

    /// Whether the Beads-to-planning pass runs.
    #[must_use]
    pub fn pulls_from_beads(self) -> bool {
        !matches!(self, Self::AToB)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bidirectional => f.write_str("bidirectional"),
            Self::AToB => f.write_str("a_to_b"),
            Self::BToA => f.write_str("b_to_a"),
        }
    }
}

/// Options for one sync pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Describe the actions without performing them or saving links.
    pub dry_run: bool,
    /// Which passes run.
    pub direction: Direction,
    /// Include timestamps and other detail in the report.
    pub verbose: bool,
}

/// The store an action writes to, seen from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Planning store to Beads.
    AToB,
    /// Beads to planning store.
    BToA,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AToB => f.write_str("a_to_b"),
            Self::BToA => f.write_str("b_to_a"),
        }
    }
}

/// A create or update, performed or (in a dry run) intended.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncAction {
    /// Direction of the write.
    pub flow: Flow,
    /// Planning task id.
    pub a_id: u64,
    /// Beads issue id; `None` for a create that has not happened.
    pub b_id: Option<String>,
    /// Title of the task being written.
    pub title: String,
    /// Why the action was taken.
    pub reason: String,
}

/// A link discovered from a Beads title.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoLink {
    /// Planning task id recovered from the title.
    pub a_id: u64,
    /// Beads issue id.
    pub b_id: String,
    /// The Beads title the id came from.
    pub title: String,
}

/// A linked pair whose statuses differ with no newer side.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    /// Planning task id.
    pub a_id: u64,
    /// Beads issue id.
    pub b_id: String,
    /// Planning task title.
    pub title: String,
    /// Status in the planning store.
    pub a_status: TaskStatus,
    /// Status in Beads.
    pub b_status: TaskStatus,
    /// Planning task timestamp.
    pub a_updated: Option<DateTime<Utc>>,
    /// Beads issue timestamp.
    pub b_updated: Option<DateTime<Utc>>,
}

/// What a skipped action was trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Create a Beads issue.
    Create,
    /// Propagate a status.
    Update,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("CREATE"),
            Self::Update => f.write_str("UPDATE"),
        }
    }
}

/// An action that failed and was passed over.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedAction {
    /// Create or update.
    pub kind: ActionKind,
    /// What was attempted.
    pub action: SyncAction,
    /// Why it failed.
    pub error: String,
}

/// Totals after a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Tasks read from the planning store.
    pub planning_tasks: usize,
    /// Issues read from Beads.
    pub beads_tasks: usize,
    /// Links after the pass.
    pub links: usize,
    /// Planning task count minus link count, floored at zero.
    ///
    /// Links whose planning task has been deleted still count, so this can
    /// under-report.
    pub unlinked: usize,
}

/// Everything a pass did, or would do in a dry run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncResult {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Which passes ran.
    pub direction: Direction,
    /// Links discovered from titles.
    pub auto_linked: Vec<AutoLink>,
    /// Beads issues created for unlinked planning tasks.
    pub created: Vec<SyncAction>,
    /// Status propagations.
    pub updated: Vec<SyncAction>,
    /// Pairs left for manual resolution.
    pub conflicts: Vec<Conflict>,
    /// Failed actions.
    pub skipped: Vec<SkippedAction>,
    /// Totals.
    pub stats: SyncStats,
}

impl SyncResult {
    /// An empty result for a pass run with `options`.
    #[must_use]
    pub fn new(options: &SyncOptions) -> Self {
        Self {
            dry_run: options.dry_run,
            direction: options.direction,
            auto_linked: Vec::new(),
            created: Vec::new(),
            updated: Vec::new(),
            conflicts: Vec::new(),
            skipped: Vec::new(),
            stats: SyncStats::default(),
        }
    }

    /// Returns `true` if the pass found nothing to do.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.auto_linked.is_empty()
            && self.created.is_empty()
            && self.updated.is_empty()
            && self.conflicts.is_empty()
            && self.skipped.is_empty()
    }
}
