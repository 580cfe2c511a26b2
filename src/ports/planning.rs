//! Port for the planning-oriented task store (Source A).

use crate::model::{TaskStatus, UnifiedTask};

use super::PortError;

/// Read and status-write access to the planning store.
pub trait PlanningSource {
    /// Returns `true` if the backing task file is present.
    fn exists(&self) -> bool;

    /// Lists every top-level task, normalized into the unified model.
    ///
    /// An absent task file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is present but cannot be read or parsed,
    /// so callers never mistake a broken file for an empty project.
    fn list_unified(&self) -> Result<Vec<UnifiedTask>, PortError>;

    /// Writes `status` onto the task with the given native id.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or unwritable, or the task
    /// does not exist.
    fn apply_status(&self, native_id: u64, status: TaskStatus) -> Result<(), PortError>;
}
