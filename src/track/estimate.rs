// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Reference-line active-index estimation.

use std::error::Error;
use std::fmt;

use crate::host::HostPage;
use crate::model::Turn;

use super::REFERENCE_LINE_RATIO;

/// Layout queries returned degenerate values (zero-sized viewport, typically
/// during initial load). The caller keeps its previous answer for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryUnavailable;

impl fmt::Display for GeometryUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("viewport geometry unavailable")
    }
}

impl Error for GeometryUnavailable {}

/// Picks the turn closest to the reference line (30% of viewport height from
/// the top). Distance is zero when the line crosses a turn's box, otherwise
/// the distance to the nearest edge; ties break to the lowest index.
///
/// Detached turns are skipped. An empty list, or one with no attached turn
/// left, yields `Ok(None)`. Pure function of current layout, cheap enough to
/// run on every coalesced scroll/resize tick.
pub fn estimate(
    page: &impl HostPage,
    turns: &[Turn],
) -> Result<Option<usize>, GeometryUnavailable> {
    let viewport = page.viewport_height();
    if viewport <= 0.0 {
        return Err(GeometryUnavailable);
    }
    let line = viewport * REFERENCE_LINE_RATIO;

    let mut best: Option<(usize, f64)> = None;
    for (index, turn) in turns.iter().enumerate() {
        let Some(rect) = page.rect(turn.node()) else {
            continue;
        };
        let distance = rect.distance_to_line(line);
        match best {
            // Strict comparison keeps the lowest index on an exact tie.
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    Ok(best.map(|(index, _)| index))
}
