//! In-memory link store with lookups in both directions.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::file::LinkStoreError;

/// Current version of the persisted record.
pub const STORE_VERSION: u32 = 1;

/// One persisted pairing of a planning task and a Beads issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Planning task id.
    pub a_id: u64,
    /// Beads issue id.
    pub b_id: String,
    /// When the link was made.
    pub linked_at: DateTime<Utc>,
    /// `true` when discovered from a title convention rather than made by
    /// an explicit `link` command.
    pub auto_linked: bool,
}

impl Link {
    /// A link made by hand or by the engine creating a counterpart.
    #[must_use]
    pub fn manual(a_id: u64, b_id: &str, linked_at: DateTime<Utc>) -> Self {
        Self { a_id, b_id: b_id.to_string(), linked_at, auto_linked: false }
    }

    /// A link discovered from a Beads title.
    #[must_use]
    pub fn auto(a_id: u64, b_id: &str, linked_at: DateTime<Utc>) -> Self {
        Self { a_id, b_id: b_id.to_string(), linked_at, auto_linked: true }
    }
}

/// Failures of link and unlink requests. None of them mutate the store.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The planning task already has a link.
    #[error("planning task A-{a_id} is already linked to {b_id}")]
    PlanningAlreadyLinked {
        /// The requested planning id.
        a_id: u64,
        /// Its current partner.
        b_id: String,
    },
    /// The Beads issue already has a link.
    #[error("beads issue {b_id} is already linked to A-{a_id}")]
    BeadsAlreadyLinked {
        /// The requested Beads id.
        b_id: String,
        /// Its current partner.
        a_id: u64,
    },
    /// No link matched an unlink request.
    #[error("no link found for {0}")]
    NotFound(LinkTarget),
    /// A planning id argument was not numeric.
    #[error("invalid planning task id: {0}")]
    InvalidPlanningId(String),
    /// The change was valid but could not be written.
    #[error(transparent)]
    Persist(#[from] LinkStoreError),
}

/// What an `unlink` argument refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A planning id.
    Planning(u64),
    /// A raw Beads id.
    Beads(String),
}

impl LinkTarget {
    /// Classifies an identifier.
    ///
    /// Digits with an optional `a:` or `a-` prefix name a planning task;
    /// everything else is taken verbatim as a Beads id.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let digits =
            input.strip_prefix("a:").or_else(|| input.strip_prefix("a-")).unwrap_or(input);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = digits.parse() {
                return Self::Planning(id);
            }
        }
        Self::Beads(input.to_string())
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planning(id) => write!(f, "A-{id}"),
            Self::Beads(id) => f.write_str(id),
        }
    }
}

/// The on-disk shape of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreRecord {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    links: Vec<Link>,
    #[serde(default)]
    last_sync: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    STORE_VERSION
}

/// All links, indexed by both ids.
///
/// At most one link exists per planning id and per Beads id.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStore {
    version: u32,
    links: Vec<Link>,
    last_sync: Option<DateTime<Utc>>,
    by_a: HashMap<u64, usize>,
    by_b: HashMap<String, usize>,
}

impl Default for LinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkStore {
    /// An empty store at the current version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            links: Vec::new(),
            last_sync: None,
            by_a: HashMap::new(),
            by_b: HashMap::new(),
        }
    }

    /// Record format version.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Links in insertion order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` when there are no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// When the store was last saved.
    #[must_use]
    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }

    /// Parses a persisted record. Duplicate links are dropped, keeping the
    /// first occurrence.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a store record.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<StoreRecord>(json).map(Self::from_record)
    }

    /// Renders the persisted record as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let record = StoreRecord {
            version: self.version,
            links: self.links.clone(),
            last_sync: self.last_sync,
        };
        serde_json::to_string_pretty(&record)
    }

    fn from_record(record: StoreRecord) -> Self {
        let mut store = Self { version: record.version, last_sync: record.last_sync, ..Self::new() };
        for link in record.links {
            let (a_id, b_id) = (link.a_id, link.b_id.clone());
            if store.insert(link).is_err() {
                tracing::warn!(a_id, b_id = %b_id, "dropping duplicate link from store");
            }
        }
        store
    }

    pub(crate) fn stamp(&mut self, now: DateTime<Utc>) {
        self.last_sync = Some(now);
    }

    /// The link for a planning id.
    #[must_use]
    pub fn by_a(&self, a_id: u64) -> Option<&Link> {
        self.by_a.get(&a_id).map(|&i| &self.links[i])
    }

    /// The link for a Beads id.
    #[must_use]
    pub fn by_b(&self, b_id: &str) -> Option<&Link> {
        self.by_b.get(b_id).map(|&i| &self.links[i])
    }

    /// Appends a link.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the store untouched, if either id is
    /// already linked.
    pub fn insert(&mut self, link: Link) -> Result<(), LinkError> {
        if let Some(existing) = self.by_a(link.a_id) {
            return Err(LinkError::PlanningAlreadyLinked {
                a_id: link.a_id,
                b_id: existing.b_id.clone(),
            });
        }
        if let Some(existing) = self.by_b(&link.b_id) {
            return Err(LinkError::BeadsAlreadyLinked { b_id: link.b_id, a_id: existing.a_id });
        }
        let index = self.links.len();
        self.by_a.insert(link.a_id, index);
        self.by_b.insert(link.b_id.clone(), index);
        self.links.push(link);
        Ok(())
    }

    /// Removes the link matching `target`, if any.
    pub fn remove(&mut self, target: &LinkTarget) -> Option<Link> {
        let index = match target {
            LinkTarget::Planning(a_id) => self.by_a.get(a_id).copied(),
            LinkTarget::Beads(b_id) => self.by_b.get(b_id).copied(),
        }?;
        let removed = self.links.remove(index);
        self.reindex();
        Some(removed)
    }

    fn reindex(&mut self) {
        self.by_a.clear();
        self.by_b.clear();
        for (i, link) in self.links.iter().enumerate() {
            self.by_a.insert(link.a_id, i);
            self.by_b.insert(link.b_id.clone(), i);
        }
    }
}
