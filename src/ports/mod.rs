//! Port traits defining external boundaries.
//!
//! The reconciliation core only talks to the outside world through these
//! traits: wall-clock time, the filesystem, subprocesses, and the two task
//! stores. Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod planning;
pub mod shell;
pub mod tracker;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use planning::PlanningSource;
pub use shell::{ShellExecutor, ShellOutput};
pub use tracker::{CreateOptions, ExecutionSource};

/// Error type returned across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
