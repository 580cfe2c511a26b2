//! The shared status vocabulary and its per-store lookup tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status vocabulary common to both stores.
///
/// Each store maps its native states onto this set. The mapping is lossy
/// toward Beads: it has no `blocked` or `cancelled`, so those travel as
/// `open` and `closed` and come back as `pending` and `done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Pending,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
    /// Waiting on something outside the task.
    Blocked,
    /// Abandoned.
    Cancelled,
}

impl TaskStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 5] =
        [Self::Pending, Self::InProgress, Self::Done, Self::Blocked, Self::Cancelled];

    /// Canonical snake-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
            Self::Cancelled => "cancelled",
        }
    }

    /// Maps a planning-store status onto the shared vocabulary.
    ///
    /// `review` counts as in progress and `deferred` as pending. Anything
    /// unrecognized falls back to [`TaskStatus::Pending`].
    #[must_use]
    pub fn from_planning(native: &str) -> Self {
        match native.trim().to_ascii_lowercase().as_str() {
            "in-progress" | "in_progress" | "review" => Self::InProgress,
            "done" => Self::Done,
            "blocked" => Self::Blocked,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    /// Native planning-store spelling. Every status round-trips.
    #[must_use]
    pub fn to_planning(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
            Self::Cancelled => "cancelled",
        }
    }

    /// Maps a Beads status onto the shared vocabulary.
    #[must_use]
    pub fn from_beads(native: &str) -> Self {
        match native.trim().to_ascii_lowercase().as_str() {
            "in_progress" => Self::InProgress,
            "closed" => Self::Done,
            _ => Self::Pending,
        }
    }

    /// Native Beads spelling.
    ///
    /// Not injective: `blocked` is written as `open` and `cancelled` as
    /// `closed`, so neither survives a round trip through Beads.
    #[must_use]
    pub fn to_beads(self) -> &'static str {
        match self {
            Self::Pending | Self::Blocked => "open",
            Self::InProgress => "in_progress",
            Self::Done | Self::Cancelled => "closed",
        }
    }

    /// Whether Beads stores both statuses the same way.
    ///
    /// `blocked` agrees with `open` and `cancelled` with `closed`, since
    /// Beads cannot tell them apart.
    #[must_use]
    pub fn agrees_in_beads(self, other: Self) -> bool {
        self.to_beads() == other.to_beads()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planning_vocabulary_round_trips() {
        for native in ["pending", "in-progress", "done", "blocked", "cancelled"] {
            assert_eq!(TaskStatus::from_planning(native).to_planning(), native);
        }
    }

    #[test]
    fn planning_extra_states_map_to_nearest() {
        assert_eq!(TaskStatus::from_planning("review").to_planning(), "in-progress");
        assert_eq!(TaskStatus::from_planning("deferred").to_planning(), "pending");
    }

    #[test]
    fn planning_unknown_defaults_to_pending() {
        assert_eq!(TaskStatus::from_planning("someday"), TaskStatus::Pending);
        assert_eq!(TaskStatus::from_planning(""), TaskStatus::Pending);
    }

    #[test]
    fn beads_vocabulary_round_trips() {
        for native in ["open", "in_progress", "closed"] {
            assert_eq!(TaskStatus::from_beads(native).to_beads(), native);
        }
    }

    #[test]
    fn beads_has_no_blocked_or_cancelled() {
        assert_eq!(TaskStatus::from_beads(TaskStatus::Blocked.to_beads()), TaskStatus::Pending);
        assert_eq!(TaskStatus::from_beads(TaskStatus::Cancelled.to_beads()), TaskStatus::Done);
    }

    #[test]
    fn lossy_states_agree_with_their_beads_spelling() {
        assert!(TaskStatus::Blocked.agrees_in_beads(TaskStatus::Pending));
        assert!(TaskStatus::Cancelled.agrees_in_beads(TaskStatus::Done));
        assert!(!TaskStatus::Cancelled.agrees_in_beads(TaskStatus::Pending));
        assert!(!TaskStatus::InProgress.agrees_in_beads(TaskStatus::Pending));
    }

    #[test]
    fn denormalize_is_right_inverse_on_shared_states() {
        for status in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(TaskStatus::from_planning(status.to_planning()), status);
            assert_eq!(TaskStatus::from_beads(status.to_beads()), status);
        }
    }

    #[test]
    fn normalization_ignores_case_and_padding() {
        assert_eq!(TaskStatus::from_planning(" In-Progress "), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from_beads("CLOSED"), TaskStatus::Done);
    }
}
