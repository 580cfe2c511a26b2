//! Adapter implementations of the port traits.
//!
//! `live` wraps the real clock, disk, and processes. `planning` and `beads`
//! implement the two task-store ports on top of a [`ServiceContext`].
//!
//! [`ServiceContext`]: crate::context::ServiceContext

pub mod beads;
pub mod live;
pub mod planning;
