//! Store-agnostic task model and the normalization rules for each store.
//!
//! Everything in here is pure: the same native record always yields the
//! same [`UnifiedTask`], and nothing touches the disk.

pub mod beads;
pub mod planning;
mod priority;
mod status;
mod task;

pub use priority::{beads_priority, planning_priority, DEFAULT_PRIORITY, MAX_PRIORITY};
pub use status::TaskStatus;
pub use task::{namespaced, parse_timestamp, SourceRef, SourceSystem, UnifiedTask};
