// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Host page abstraction.
//!
//! The tracker core never owns page content; it reads geometry and issues
//! scrolls through [`HostPage`]. The concrete [`SimPage`] implementation is a
//! deterministic simulated page used by the TUI demo and by tests.

pub mod sim;

pub use sim::SimPage;

use crate::model::NodeId;

/// Viewport-relative vertical extent of a node, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical distance from a horizontal line to this box: zero when the
    /// line falls inside, otherwise distance to the nearest edge.
    pub fn distance_to_line(&self, line: f64) -> f64 {
        if line < self.top {
            self.top - line
        } else if line > self.bottom() {
            line - self.bottom()
        } else {
            0.0
        }
    }
}

/// A scrollable container: either the page's root scroller or a node whose
/// overflow policy makes it independently scrollable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scroller {
    Root,
    Node(NodeId),
}

/// How a programmatic scroll is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated scroll; arrival position is not guaranteed pixel-exact.
    Smooth,
    /// Immediate jump to the exact offset.
    Instant,
}

/// Geometry and scrolling surface of the host page.
///
/// All queries are reads of the page's current layout; geometry may change
/// between any two calls. A detached node answers `None` from
/// [`HostPage::rect`] and callers drop the affected operation silently.
pub trait HostPage {
    fn viewport_height(&self) -> f64;

    /// Viewport-relative extent of a node, `None` when detached.
    fn rect(&self, node: NodeId) -> Option<Rect>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether the node's overflow policy permits vertical scrolling at all.
    /// Whether it actually overflows is a separate size question.
    fn allows_vertical_scroll(&self, node: NodeId) -> bool;

    /// Total scrollable content height of a container.
    fn scroll_height(&self, scroller: Scroller) -> f64;

    /// Visible height of a container; for the root this is the viewport.
    fn client_height(&self, scroller: Scroller) -> f64;

    fn scroll_top(&self, scroller: Scroller) -> f64;

    /// Issues a programmatic scroll. Offsets are clamped to the container's
    /// scrollable range by the implementation.
    fn scroll_to(&mut self, scroller: Scroller, offset: f64, behavior: ScrollBehavior);
}
