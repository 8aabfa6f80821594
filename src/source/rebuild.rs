// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Debounced rebuild scheduling.
//!
//! Page mutations arrive in bursts; each notification pushes the rebuild
//! deadline out so one quiet window produces one snapshot rebuild.

use std::time::{Duration, Instant};

/// Quiet window between the last mutation notification and the rebuild.
pub const REBUILD_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
pub struct RebuildScheduler {
    deadline: Option<Instant>,
}

impl RebuildScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mutation notification, arming or extending the deadline.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + REBUILD_DEBOUNCE);
    }

    /// True exactly once per armed deadline, when it has elapsed.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{RebuildScheduler, REBUILD_DEBOUNCE};

    #[test]
    fn burst_of_notifications_fires_once() {
        let mut scheduler = RebuildScheduler::new();
        let base = Instant::now();
        for ms in [0, 50, 100] {
            scheduler.notify(base + Duration::from_millis(ms));
        }
        let last = base + Duration::from_millis(100);
        assert!(!scheduler.due(last + REBUILD_DEBOUNCE - Duration::from_millis(1)));
        assert!(scheduler.due(last + REBUILD_DEBOUNCE));
        assert!(!scheduler.due(last + REBUILD_DEBOUNCE + Duration::from_millis(500)));
    }

    #[test]
    fn idle_scheduler_is_never_due() {
        let mut scheduler = RebuildScheduler::new();
        assert!(!scheduler.is_pending());
        assert!(!scheduler.due(Instant::now()));
    }
}
