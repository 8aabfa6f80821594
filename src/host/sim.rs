// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Deterministic simulated page.
//!
//! A small node arena with vertical stacking layout: plain blocks occupy
//! their own height, scroll regions clip their children to a fixed client
//! height, and the page root is itself a scroller over the top-level stack.
//! Programmatic smooth scrolls run as an eased tween advanced by
//! [`SimPage::tick`]; user scrolling goes through `drag_*` and cancels any
//! running tween, mirroring how a real page lets the user take over
//! mid-animation.

use std::time::{Duration, Instant};

use crate::model::{NodeId, Role};

use super::{HostPage, Rect, ScrollBehavior, Scroller};

/// Duration of an animated scroll issued with [`ScrollBehavior::Smooth`].
pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default)]
struct ScrollState {
    top: f64,
    anim: Option<ScrollAnim>,
}

#[derive(Debug, Clone)]
struct ScrollAnim {
    from: f64,
    to: f64,
    /// Anchored on the first `tick` after the scroll was issued, so test
    /// clocks drive the tween deterministically.
    started: Option<Instant>,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<usize>,
    children: Vec<usize>,
    /// Own box height for plain blocks; client height for scroll regions.
    height: f64,
    scroll: Option<ScrollState>,
    detached: bool,
    message: Option<(Role, String)>,
}

/// In-memory page with deterministic layout.
#[derive(Debug, Clone)]
pub struct SimPage {
    viewport_height: f64,
    nodes: Vec<Node>,
    roots: Vec<usize>,
    root_scroll: ScrollState,
    instant_scrolls: u32,
    smooth_scrolls: u32,
}

impl SimPage {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            nodes: Vec::new(),
            roots: Vec::new(),
            root_scroll: ScrollState::default(),
            instant_scrolls: 0,
            smooth_scrolls: 0,
        }
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Appends a plain block of the given height.
    pub fn push_block(&mut self, parent: Option<NodeId>, height: f64) -> NodeId {
        self.push_node(parent, height, None, None)
    }

    /// Appends a message block carrying conversation content.
    pub fn push_message(
        &mut self,
        parent: Option<NodeId>,
        role: Role,
        text: impl Into<String>,
        height: f64,
    ) -> NodeId {
        self.push_node(parent, height, None, Some((role, text.into())))
    }

    /// Appends an independently scrollable region with a fixed client height.
    pub fn push_scroll_region(&mut self, parent: Option<NodeId>, client_height: f64) -> NodeId {
        self.push_node(parent, client_height, Some(ScrollState::default()), None)
    }

    fn push_node(
        &mut self,
        parent: Option<NodeId>,
        height: f64,
        scroll: Option<ScrollState>,
        message: Option<(Role, String)>,
    ) -> NodeId {
        let idx = self.nodes.len();
        let parent_idx = parent.map(|p| p.raw() as usize);
        self.nodes.push(Node {
            parent: parent_idx,
            children: Vec::new(),
            height,
            scroll,
            detached: false,
            message,
        });
        match parent_idx {
            Some(p) => self.nodes[p].children.push(idx),
            None => self.roots.push(idx),
        }
        NodeId::new(idx as u64)
    }

    /// Detaches a node (and implicitly its subtree) from layout.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.get_mut(node.raw() as usize) {
            n.detached = true;
        }
    }

    /// Message nodes in document order, detached ones skipped.
    pub fn messages(&self) -> Vec<(NodeId, Role, &str)> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.collect_messages(root, &mut out);
        }
        out
    }

    fn collect_messages<'a>(&'a self, idx: usize, out: &mut Vec<(NodeId, Role, &'a str)>) {
        let node = &self.nodes[idx];
        if node.detached {
            return;
        }
        if let Some((role, text)) = &node.message {
            out.push((NodeId::new(idx as u64), *role, text.as_str()));
        }
        for &child in &node.children {
            self.collect_messages(child, out);
        }
    }

    /// Advances running scroll animations; returns true if any offset moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut moved = advance(&mut self.root_scroll, now);
        for node in &mut self.nodes {
            if let Some(state) = node.scroll.as_mut() {
                moved |= advance(state, now);
            }
        }
        moved
    }

    pub fn is_animating(&self) -> bool {
        self.root_scroll.anim.is_some()
            || self
                .nodes
                .iter()
                .any(|n| n.scroll.as_ref().is_some_and(|s| s.anim.is_some()))
    }

    /// User-initiated scroll by a delta; cancels any running animation.
    pub fn drag_by(&mut self, scroller: Scroller, delta: f64) {
        let target = self.scroll_top(scroller) + delta;
        self.drag_to(scroller, target);
    }

    /// User-initiated scroll to an absolute offset.
    pub fn drag_to(&mut self, scroller: Scroller, offset: f64) {
        let clamped = offset.clamp(0.0, self.max_scroll(scroller));
        if let Some(state) = self.scroll_state_mut(scroller) {
            state.top = clamped;
            state.anim = None;
        }
    }

    pub fn max_scroll(&self, scroller: Scroller) -> f64 {
        (self.scroll_height(scroller) - self.client_height(scroller)).max(0.0)
    }

    /// Count of programmatic non-animated scrolls issued so far.
    pub fn instant_scroll_count(&self) -> u32 {
        self.instant_scrolls
    }

    /// Count of programmatic animated scrolls issued so far.
    pub fn smooth_scroll_count(&self) -> u32 {
        self.smooth_scrolls
    }

    fn scroll_state(&self, scroller: Scroller) -> Option<&ScrollState> {
        match scroller {
            Scroller::Root => Some(&self.root_scroll),
            Scroller::Node(id) => self.nodes.get(id.raw() as usize)?.scroll.as_ref(),
        }
    }

    fn scroll_state_mut(&mut self, scroller: Scroller) -> Option<&mut ScrollState> {
        match scroller {
            Scroller::Root => Some(&mut self.root_scroll),
            Scroller::Node(id) => self.nodes.get_mut(id.raw() as usize)?.scroll.as_mut(),
        }
    }

    /// Height a node contributes to its parent's stacking: client height for
    /// scroll regions, own or summed-children height otherwise.
    fn outer_height(&self, idx: usize) -> f64 {
        let node = &self.nodes[idx];
        if node.detached {
            return 0.0;
        }
        if node.scroll.is_some() || node.children.is_empty() {
            return node.height;
        }
        node.children.iter().map(|&c| self.outer_height(c)).sum()
    }

    fn content_height(&self, children: &[usize]) -> f64 {
        children.iter().map(|&c| self.outer_height(c)).sum()
    }

    /// Viewport-relative top of a node; `None` when it or an ancestor is
    /// detached.
    fn top_of(&self, idx: usize) -> Option<f64> {
        let node = &self.nodes[idx];
        if node.detached {
            return None;
        }
        match node.parent {
            None => {
                let before: f64 = self
                    .roots
                    .iter()
                    .take_while(|&&r| r != idx)
                    .map(|&r| self.outer_height(r))
                    .sum();
                Some(before - self.root_scroll.top)
            }
            Some(parent) => {
                let parent_top = self.top_of(parent)?;
                let parent_node = &self.nodes[parent];
                let before: f64 = parent_node
                    .children
                    .iter()
                    .take_while(|&&c| c != idx)
                    .map(|&c| self.outer_height(c))
                    .sum();
                let scrolled = parent_node.scroll.as_ref().map_or(0.0, |s| s.top);
                Some(parent_top + before - scrolled)
            }
        }
    }
}

fn advance(state: &mut ScrollState, now: Instant) -> bool {
    let Some(anim) = state.anim.as_mut() else {
        return false;
    };
    let started = *anim.started.get_or_insert(now);
    let elapsed = now.saturating_duration_since(started);
    let (from, to) = (anim.from, anim.to);
    let before = state.top;
    if elapsed >= SMOOTH_SCROLL_DURATION {
        state.top = to;
        state.anim = None;
    } else {
        let t = elapsed.as_secs_f64() / SMOOTH_SCROLL_DURATION.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        state.top = from + (to - from) * eased;
    }
    state.top != before
}

impl HostPage for SimPage {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn rect(&self, node: NodeId) -> Option<Rect> {
        let idx = node.raw() as usize;
        if idx >= self.nodes.len() {
            return None;
        }
        let top = self.top_of(idx)?;
        Some(Rect { top, height: self.outer_height(idx) })
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes
            .get(node.raw() as usize)?
            .parent
            .map(|p| NodeId::new(p as u64))
    }

    fn allows_vertical_scroll(&self, node: NodeId) -> bool {
        self.nodes
            .get(node.raw() as usize)
            .is_some_and(|n| n.scroll.is_some())
    }

    fn scroll_height(&self, scroller: Scroller) -> f64 {
        match scroller {
            Scroller::Root => self.content_height(&self.roots),
            Scroller::Node(id) => match self.nodes.get(id.raw() as usize) {
                Some(node) => self.content_height(&node.children),
                None => 0.0,
            },
        }
    }

    fn client_height(&self, scroller: Scroller) -> f64 {
        match scroller {
            Scroller::Root => self.viewport_height,
            Scroller::Node(id) => self
                .nodes
                .get(id.raw() as usize)
                .map_or(0.0, |n| n.height),
        }
    }

    fn scroll_top(&self, scroller: Scroller) -> f64 {
        self.scroll_state(scroller).map_or(0.0, |s| s.top)
    }

    fn scroll_to(&mut self, scroller: Scroller, offset: f64, behavior: ScrollBehavior) {
        let clamped = offset.clamp(0.0, self.max_scroll(scroller));
        let Some(state) = self.scroll_state_mut(scroller) else {
            return;
        };
        match behavior {
            ScrollBehavior::Instant => {
                state.top = clamped;
                state.anim = None;
            }
            ScrollBehavior::Smooth => {
                state.anim = Some(ScrollAnim { from: state.top, to: clamped, started: None });
            }
        }
        match behavior {
            ScrollBehavior::Instant => self.instant_scrolls += 1,
            ScrollBehavior::Smooth => self.smooth_scrolls += 1,
        }
    }
}
