//! Persistent identity links between planning tasks and Beads issues.
//!
//! A link pairs one planning id with one Beads id. The pairing is a 1:1
//! partial matching, kept in a single JSON file that is loaded once per
//! command and saved once at the end.

mod extract;
mod file;
mod store;

pub use extract::{extract_planning_id, parse_planning_id, planning_title};
pub use file::{LinkFile, LinkStoreError};
pub use store::{Link, LinkError, LinkStore, LinkTarget, STORE_VERSION};
