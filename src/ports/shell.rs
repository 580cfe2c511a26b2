//! Shell executor port for running external commands.

use std::path::Path;

use super::PortError;

/// The output of a finished subprocess.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` when the process exited with code zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes external programs.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args` in `cwd` and waits for it to finish.
    ///
    /// Arguments are passed verbatim, never through a shell, so titles with
    /// quotes or `$` survive intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned (for example when it
    /// is not installed).
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ShellOutput, PortError>;
}
