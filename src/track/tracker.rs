// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! The tracker: active-state owner and lock arbiter.

use std::time::Instant;

use crate::host::{HostPage, ScrollBehavior};
use crate::model::{NodeId, Turn, TurnSnapshot};

use super::{estimate, locate, IDLE_RELEASE_DELAY, MAX_LOCK_DURATION, SNAP_EPSILON_PX};

/// What [`Tracker::apply_snapshot`] decided about a new snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// Same count and same labels: turns kept, active index untouched. The
    /// host only needs to re-subscribe its geometry listeners.
    Unchanged,
    /// Real change: turns replaced wholesale, active index revalidated
    /// against the new bounds and an estimation pass scheduled.
    Replaced,
}

/// Arbitration lock taken by `navigate`.
///
/// Exists only between a navigate command and its release. While it lives,
/// estimation keeps running but its result is not applied. Superseding
/// navigates overwrite the whole value, which cancels both deadlines and the
/// pending snap in one move.
#[derive(Debug, Clone, Copy)]
struct Lock {
    expires_at: Instant,
    idle_deadline: Instant,
    pending_snap: NodeId,
}

/// Owns the authoritative active index for one page session.
///
/// Scroll position drives the index through [`estimate()`] except during the
/// lock window that follows an explicit [`navigate`](Tracker::navigate). All
/// methods take `now` explicitly so hosts and tests drive the clock; the
/// hosting glue is expected to call [`on_frame`](Tracker::on_frame) once per
/// rendered frame, which is also what coalesces estimation work to display
/// refresh rate.
#[derive(Debug, Default)]
pub struct Tracker {
    turns: Vec<Turn>,
    active: Option<usize>,
    last_estimated: Option<usize>,
    lock: Option<Lock>,
    estimate_pending: bool,
    rev: u64,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current authoritative active index.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Bumped exactly when the active index changes, so the presentation
    /// layer can redraw on change without polling every estimation tick.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Rebuild reconciliation for a fresh [`TurnSnapshot`].
    pub fn apply_snapshot(&mut self, snapshot: TurnSnapshot) -> SnapshotOutcome {
        if snapshot.labels_match(&self.turns) {
            return SnapshotOutcome::Unchanged;
        }
        self.turns = snapshot.into_turns();
        // The old index is a hint, not a fact; out of bounds means "none"
        // until the next estimation pass says otherwise.
        if self.active.is_some_and(|index| index >= self.turns.len()) {
            self.set_active(None);
        }
        self.estimate_pending = true;
        SnapshotOutcome::Replaced
    }

    /// Explicit navigation to `index`. Out-of-range indices are a no-op.
    ///
    /// Forces the active index immediately for synchronous visual feedback,
    /// takes (or supersedes) the lock, and issues one smooth scroll toward
    /// the located target. A stale node skips the scroll silently; the lock
    /// is still held so the release path can resynchronize.
    pub fn navigate(&mut self, page: &mut impl HostPage, index: usize, now: Instant) {
        let Some(turn) = self.turns.get(index) else {
            return;
        };
        let node = turn.node();
        self.set_active(Some(index));
        self.lock = Some(Lock {
            expires_at: now + MAX_LOCK_DURATION,
            idle_deadline: now + IDLE_RELEASE_DELAY,
            pending_snap: node,
        });
        if let Ok(target) = locate(page, node) {
            page.scroll_to(target.container, target.offset, ScrollBehavior::Smooth);
        }
    }

    /// Scroll or resize activity notification from the hosting glue.
    ///
    /// Marks one coalesced estimation pass pending and, while locked,
    /// pushes the idle deadline out. The hard ceiling is deliberately not
    /// refreshed: a lock never outlives `MAX_LOCK_DURATION`.
    pub fn on_scroll_or_resize(&mut self, now: Instant) {
        self.estimate_pending = true;
        if let Some(lock) = self.lock.as_mut() {
            if now < lock.expires_at {
                lock.idle_deadline = now + IDLE_RELEASE_DELAY;
            }
        }
    }

    /// Once-per-frame pass: releases an expired lock (snap correction, then
    /// one resync estimation) and runs the pending estimation if any.
    pub fn on_frame(&mut self, page: &mut impl HostPage, now: Instant) {
        if let Some(lock) = self.lock {
            if now >= lock.idle_deadline || now >= lock.expires_at {
                self.lock = None;
                snap_to(page, lock.pending_snap);
                self.estimate_pending = true;
            }
        }

        if !self.estimate_pending {
            return;
        }
        self.estimate_pending = false;
        match estimate(page, &self.turns) {
            Ok(index) => {
                self.last_estimated = index;
                if self.lock.is_none() {
                    self.set_active(index);
                }
            }
            // Degenerate viewport: keep the previous answer this tick.
            Err(super::GeometryUnavailable) => {}
        }
    }

    fn set_active(&mut self, index: Option<usize>) {
        if self.active != index {
            self.active = index;
            self.rev = self.rev.wrapping_add(1);
        }
    }
}

/// One-shot corrective scroll at lock release: a smooth scroll's arrival
/// position is not pixel-exact, so re-locate the target and jump to it when
/// the miss exceeds the threshold. A stale node drops the snap silently.
fn snap_to(page: &mut impl HostPage, node: NodeId) {
    let Ok(target) = locate(page, node) else {
        return;
    };
    if (page.scroll_top(target.container) - target.offset).abs() > SNAP_EPSILON_PX {
        page.scroll_to(target.container, target.offset, ScrollBehavior::Instant);
    }
}
