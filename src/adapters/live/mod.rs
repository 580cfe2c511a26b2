//! Live adapters for the low-level ports.

pub mod clock;
pub mod filesystem;
pub mod shell;
