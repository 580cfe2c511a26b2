//! Service context bundling the port trait objects.

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::ShellExecutor;

/// Bundles the low-level ports every command needs.
///
/// The store adapters and the link file borrow this context, so swapping a
/// port here swaps it for the whole command.
pub struct ServiceContext {
    /// Clock for link and sync timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem for task files, config, and the link store.
    pub fs: Box<dyn FileSystem>,
    /// Subprocess runner for the Beads CLI.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a context backed by the real clock, disk, and processes.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            shell: Box::new(LiveShellExecutor),
        }
    }
}
