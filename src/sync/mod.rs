//! Bidirectional reconciliation between the planning store and Beads.

mod engine;
mod report;
mod result;

pub use engine::{Reconciler, SyncError};
pub use report::format_result;
pub use result::{
    ActionKind, AutoLink, Conflict, Direction, Flow, SkippedAction, SyncAction, SyncOptions, SyncResult,
    SyncStats,
};
