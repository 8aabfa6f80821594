// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Scroll container and target-offset resolution.

use std::error::Error;
use std::fmt;

use smallvec::SmallVec;

use crate::host::{HostPage, Scroller};
use crate::model::NodeId;

use super::SCROLLABLE_MIN_OVERFLOW_PX;

/// Where to scroll, and to what offset, to bring a turn to the top of its
/// enclosing container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub container: Scroller,
    pub offset: f64,
}

/// The node backing a turn is no longer attached to the page.
///
/// Not fatal: callers drop the pending operation and rely on the next
/// snapshot rebuild to drop the turn itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleNode;

impl fmt::Display for StaleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("node is no longer attached to the page")
    }
}

impl Error for StaleNode {}

/// Resolves the scroll container for `node` and the clamped offset that
/// aligns the node's top edge with the container's top edge.
///
/// The container is the nearest ancestor whose overflow policy allows
/// vertical scrolling and whose content actually overflows its client
/// height; the root scroller otherwise. Pure geometry read; resolved per
/// call because layout may have changed since the last one.
pub fn locate(page: &impl HostPage, node: NodeId) -> Result<ScrollTarget, StaleNode> {
    let rect = page.rect(node).ok_or(StaleNode)?;

    let mut chain: SmallVec<[NodeId; 8]> = SmallVec::new();
    let mut cursor = page.parent(node);
    while let Some(ancestor) = cursor {
        chain.push(ancestor);
        cursor = page.parent(ancestor);
    }

    for &ancestor in &chain {
        if !page.allows_vertical_scroll(ancestor) {
            continue;
        }
        let container = Scroller::Node(ancestor);
        if page.scroll_height(container)
            <= page.client_height(container) + SCROLLABLE_MIN_OVERFLOW_PX
        {
            continue;
        }
        let container_top = page.rect(ancestor).ok_or(StaleNode)?.top;
        let raw = rect.top - container_top + page.scroll_top(container);
        return Ok(ScrollTarget { container, offset: clamp(page, container, raw) });
    }

    let root = Scroller::Root;
    let raw = rect.top + page.scroll_top(root);
    Ok(ScrollTarget { container: root, offset: clamp(page, root, raw) })
}

fn clamp(page: &impl HostPage, container: Scroller, offset: f64) -> f64 {
    let max = (page.scroll_height(container) - page.client_height(container)).max(0.0);
    offset.clamp(0.0, max)
}
