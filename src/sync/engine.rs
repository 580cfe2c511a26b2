//! The reconciliation pass.
//!
//! A pass runs in a fixed order: auto-link, planning-to-Beads, then
//! Beads-to-planning, then stats. Status changes follow the strictly newer
//! `updated_at`; equal timestamps (including both missing) are conflicts and
//! nothing is written. Statuses are compared as Beads spells them, so
//! `blocked`/`open` and `cancelled`/`closed` count as in step. A failed
//! write is recorded as skipped and the pass carries on.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::result::{
    ActionKind, AutoLink, Conflict, Flow, SkippedAction, SyncAction, SyncOptions, SyncResult, SyncStats,
};
use crate::links::{extract_planning_id, planning_title, Link, LinkFile, LinkStore, LinkStoreError};
use crate::model::{TaskStatus, UnifiedTask};
use crate::ports::{Clock, CreateOptions, ExecutionSource, PlanningSource};

/// Failures that stop a pass before or after it mutates anything.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The planning store could not be read.
    #[error("failed to read planning tasks: {0}")]
    PlanningRead(String),
    /// Beads could not be read.
    #[error("failed to read beads issues: {0}")]
    BeadsRead(String),
    /// The link store could not be saved.
    #[error(transparent)]
    Persist(#[from] LinkStoreError),
}

/// Mutable state threaded through one pass.
struct Pass {
    dry_run: bool,
    now: DateTime<Utc>,
    conflicted: HashSet<u64>,
    result: SyncResult,
}

/// Runs sync passes between a planning store and Beads.
pub struct Reconciler<'a> {
    planning: &'a dyn PlanningSource,
    beads: &'a dyn ExecutionSource,
    clock: &'a dyn Clock,
}

impl<'a> Reconciler<'a> {
    /// Creates a reconciler over the two stores.
    #[must_use]
    pub fn new(
        planning: &'a dyn PlanningSource,
        beads: &'a dyn ExecutionSource,
        clock: &'a dyn Clock,
    ) -> Self {
        Self { planning, beads, clock }
    }

    /// Loads the link store, reconciles, and saves the links unless this is
    /// a dry run.
    ///
    /// # Errors
    ///
    /// Returns an error if either store cannot be read or the links cannot
    /// be saved.
    pub fn sync(&self, file: &LinkFile<'_>, options: &SyncOptions) -> Result<SyncResult, SyncError> {
        let mut links = file.load();
        let result = self.reconcile(&mut links, options)?;
        if !options.dry_run {
            file.save(&mut links)?;
        }
        Ok(result)
    }

    /// Reconciles against an explicitly passed link store.
    ///
    /// `links` gains any auto-links and links for created issues; it is the
    /// caller's job to persist it. In a dry run the stores are only read.
    ///
    /// # Errors
    ///
    /// Returns an error if either store cannot be read. Nothing has been
    /// written when that happens.
    pub fn reconcile(
        &self,
        links: &mut LinkStore,
        options: &SyncOptions,
    ) -> Result<SyncResult, SyncError> {
        let planning_tasks =
            self.planning.list_unified().map_err(|e| SyncError::PlanningRead(e.to_string()))?;
        let beads_tasks =
            self.beads.list_unified().map_err(|e| SyncError::BeadsRead(e.to_string()))?;

        let mut pass = Pass {
            dry_run: options.dry_run,
            now: self.clock.now(),
            conflicted: HashSet::new(),
            result: SyncResult::new(options),
        };

        Self::auto_link(&beads_tasks, links, &mut pass);

        let by_a: HashMap<u64, &UnifiedTask> =
            planning_tasks.iter().filter_map(|t| t.planning_id().map(|id| (id, t))).collect();
        let by_b: HashMap<&str, &UnifiedTask> =
            beads_tasks.iter().map(|t| (t.native_id(), t)).collect();

        if options.direction.pushes_to_beads() {
            for task in &planning_tasks {
                let Some(a_id) = task.planning_id() else { continue };
                match links.by_a(a_id).map(|link| link.b_id.clone()) {
                    None => self.create_counterpart(a_id, task, links, &mut pass),
                    Some(b_id) => match by_b.get(b_id.as_str()) {
                        Some(issue) => self.reconcile_pair(a_id, task, issue, Flow::AToB, &mut pass),
                        None => tracing::debug!(a_id, b_id = %b_id, "linked issue not in beads snapshot"),
                    },
                }
            }
        }

        if options.direction.pulls_from_beads() {
            for issue in &beads_tasks {
                let Some(a_id) = links.by_b(issue.native_id()).map(|link| link.a_id) else {
                    continue;
                };
                match by_a.get(&a_id) {
                    Some(task) => self.reconcile_pair(a_id, task, issue, Flow::BToA, &mut pass),
                    None => tracing::debug!(a_id, b_id = issue.native_id(), "linked task not in planning snapshot"),
                }
            }
        }

        pass.result.stats = SyncStats {
            planning_tasks: planning_tasks.len(),
            beads_tasks: beads_tasks.len(),
            links: links.len(),
            unlinked: planning_tasks.len().saturating_sub(links.len()),
        };
        Ok(pass.result)
    }

    /// Links unlinked Beads issues whose titles name an unlinked planning id.
    fn auto_link(beads_tasks: &[UnifiedTask], links: &mut LinkStore, pass: &mut Pass) {
        for issue in beads_tasks {
            let b_id = issue.native_id();
            if links.by_b(b_id).is_some() {
                continue;
            }
            let Some(a_id) = extract_planning_id(&issue.title) else { continue };
            if let Some(existing) = links.by_a(a_id) {
                tracing::debug!(a_id, b_id, linked_to = %existing.b_id, "planning id already linked");
                continue;
            }
            if links.insert(Link::auto(a_id, b_id, pass.now)).is_ok() {
                tracing::debug!(a_id, b_id, "auto-linked from title");
                pass.result.auto_linked.push(AutoLink {
                    a_id,
                    b_id: b_id.to_string(),
                    title: issue.title.clone(),
                });
            }
        }
    }

    fn create_counterpart(
        &self,
        a_id: u64,
        task: &UnifiedTask,
        links: &mut LinkStore,
        pass: &mut Pass,
    ) {
        let title = planning_title(a_id, &task.title);
        let mut action = SyncAction {
            flow: Flow::AToB,
            a_id,
            b_id: None,
            title: title.clone(),
            reason: "no linked counterpart".to_string(),
        };
        if pass.dry_run {
            pass.result.created.push(action);
            return;
        }

        let options = CreateOptions {
            priority: task.priority,
            description: task.description.clone(),
            external_ref: Some(format!("tm-{a_id}")),
        };
        let Some(b_id) = self.beads.create_task(&title, &options) else {
            pass.result.skipped.push(SkippedAction {
                kind: ActionKind::Create,
                action,
                error: "beads is unavailable or refused the issue".to_string(),
            });
            return;
        };

        if let Err(e) = links.insert(Link::manual(a_id, &b_id, pass.now)) {
            tracing::warn!(a_id, b_id = %b_id, error = %e, "created beads issue is unlinked; link it by hand");
            let error = format!("{e}; {b_id} was created but is not linked");
            action.b_id = Some(b_id);
            pass.result.skipped.push(SkippedAction { kind: ActionKind::Create, action, error });
            return;
        }
        tracing::info!(a_id, b_id = %b_id, "created beads issue");
        action.b_id = Some(b_id.clone());
        pass.result.created.push(action);

        // `bd create` always opens the issue.
        if task.status.agrees_in_beads(TaskStatus::Pending) {
            return;
        }
        if self.beads.apply_status(&b_id, task.status) {
            tracing::info!(a_id, b_id = %b_id, status = %task.status, "set status of created issue");
        } else {
            pass.result.skipped.push(SkippedAction {
                kind: ActionKind::Update,
                action: SyncAction {
                    flow: Flow::AToB,
                    a_id,
                    b_id: Some(b_id),
                    title,
                    reason: format!("{} -> {}", TaskStatus::Pending, task.status),
                },
                error: "beads rejected the initial status".to_string(),
            });
        }
    }

    /// Propagates the newer status of a linked pair in the direction of
    /// `flow`, or records a conflict when neither side is newer.
    ///
    /// Each pass only writes its own direction; the opposite pass picks up
    /// pairs where the other side is newer.
    fn reconcile_pair(
        &self,
        a_id: u64,
        task: &UnifiedTask,
        issue: &UnifiedTask,
        flow: Flow,
        pass: &mut Pass,
    ) {
        if task.status.agrees_in_beads(issue.status) {
            return;
        }
        let b_id = issue.native_id();

        match (task.updated_or_epoch().cmp(&issue.updated_or_epoch()), flow) {
            (Ordering::Greater, Flow::AToB) => {
                let action = SyncAction {
                    flow,
                    a_id,
                    b_id: Some(b_id.to_string()),
                    title: task.title.clone(),
                    reason: format!("{} -> {}", issue.status, task.status),
                };
                if pass.dry_run {
                    pass.result.updated.push(action);
                } else if self.beads.apply_status(b_id, task.status) {
                    tracing::info!(a_id, b_id, status = %task.status, "updated beads issue");
                    pass.result.updated.push(action);
                } else {
                    pass.result.skipped.push(SkippedAction {
                        kind: ActionKind::Update,
                        action,
                        error: "beads rejected the status update".to_string(),
                    });
                }
            }
            (Ordering::Less, Flow::BToA) => {
                let action = SyncAction {
                    flow,
                    a_id,
                    b_id: Some(b_id.to_string()),
                    title: task.title.clone(),
                    reason: format!("{} -> {}", task.status, issue.status),
                };
                if pass.dry_run {
                    pass.result.updated.push(action);
                    return;
                }
                match self.planning.apply_status(a_id, issue.status) {
                    Ok(()) => {
                        tracing::info!(a_id, b_id, status = %issue.status, "updated planning task");
                        pass.result.updated.push(action);
                    }
                    Err(e) => {
                        pass.result.skipped.push(SkippedAction {
                            kind: ActionKind::Update,
                            action,
                            error: e.to_string(),
                        });
                    }
                }
            }
            (Ordering::Equal, _) => {
                if pass.conflicted.insert(a_id) {
                    tracing::debug!(a_id, b_id, "statuses differ with equal timestamps");
                    pass.result.conflicts.push(Conflict {
                        a_id,
                        b_id: b_id.to_string(),
                        title: task.title.clone(),
                        a_status: task.status,
                        b_status: issue.status,
                        a_updated: task.updated_at,
                        b_updated: issue.updated_at,
                    });
                }
            }
            _ => {}
        }
    }
}
