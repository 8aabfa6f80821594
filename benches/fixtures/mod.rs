// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use meridian::host::SimPage;
use meridian::model::{Role, Turn};

/// Flat page: `count` user turns stacked under the root scroller, heights
/// cycling through a fixed pattern so layout is non-uniform but stable.
pub fn flat_conversation(count: usize) -> (SimPage, Vec<Turn>) {
    let heights = [120.0, 260.0, 80.0, 340.0];
    let mut page = SimPage::new(900.0);
    let mut turns = Vec::with_capacity(count);
    for i in 0..count {
        let height = heights[i % heights.len()];
        let node = page.push_message(None, Role::User, format!("bench turn {i:05}"), height);
        turns.push(Turn::new(node, format!("{}. bench turn {i:05}", i + 1)));
    }
    (page, turns)
}

/// Conversation nested inside an independently scrollable region, as on
/// pages where the chat column is not the root scroller.
pub fn nested_conversation(count: usize) -> (SimPage, Vec<Turn>) {
    let mut page = SimPage::new(900.0);
    page.push_block(None, 150.0);
    let region = page.push_scroll_region(None, 700.0);
    let mut turns = Vec::with_capacity(count);
    for i in 0..count {
        let node = page.push_message(Some(region), Role::User, format!("nested turn {i:05}"), 200.0);
        turns.push(Turn::new(node, format!("{}. nested turn {i:05}", i + 1)));
    }
    (page, turns)
}
