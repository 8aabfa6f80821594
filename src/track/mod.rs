// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Active-turn tracking core.
//!
//! Three pieces, composed by [`Tracker`]:
//! - [`locate()`]: finds the scroll container enclosing a turn and the
//!   offset that aligns the turn's top with the container's top;
//! - [`estimate()`]: picks the turn closest to the viewport reference line;
//! - [`Tracker`]: owns the active index and arbitrates between continuous
//!   estimation and explicit `navigate` commands via a time-boxed lock.

pub mod estimate;
pub mod locate;
pub mod tracker;


pub use estimate::{estimate, GeometryUnavailable};
pub use locate::{locate, ScrollTarget, StaleNode};
pub use tracker::{SnapshotOutcome, Tracker};

use std::time::Duration;

/// Reference line position, as a fraction of viewport height from the top.
pub const REFERENCE_LINE_RATIO: f64 = 0.30;

/// A lock releases after this much scroll/resize silence.
pub const IDLE_RELEASE_DELAY: Duration = Duration::from_millis(140);

/// Hard ceiling on a lock's lifetime, idle or not.
pub const MAX_LOCK_DURATION: Duration = Duration::from_millis(1200);

/// Offset mismatch above which the release-time snap correction scrolls.
pub const SNAP_EPSILON_PX: f64 = 2.0;

/// Content must exceed client height by more than this for a container to
/// count as actually scrollable.
pub const SCROLLABLE_MIN_OVERFLOW_PX: f64 = 1.0;
