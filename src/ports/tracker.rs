//! Port for the execution-oriented issue tracker (Source B).

use crate::model::{TaskStatus, UnifiedTask};

use super::PortError;

/// Extra fields carried onto a newly created tracker issue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOptions {
    /// Unified priority, 0 (highest) to 4.
    pub priority: u8,
    /// Longer description copied from the planning task.
    pub description: Option<String>,
    /// Back-reference to the originating planning task.
    pub external_ref: Option<String>,
}

/// Read, create, and status-write access to the issue tracker.
///
/// Mutations never return errors: a failed or impossible mutation is
/// reported through the return value so one bad issue cannot abort a pass.
pub trait ExecutionSource {
    /// Returns `true` if the tracker's data directory is present.
    fn exists(&self) -> bool;

    /// Lists every live issue, normalized into the unified model.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue file is present but malformed.
    fn list_unified(&self) -> Result<Vec<UnifiedTask>, PortError>;

    /// Creates an issue and returns its native id, or `None` if the tracker
    /// tool is unavailable or refused the request.
    fn create_task(&self, title: &str, options: &CreateOptions) -> Option<String>;

    /// Writes `status` onto the issue. Returns `false` on any failure.
    fn apply_status(&self, native_id: &str, status: TaskStatus) -> bool;
}
