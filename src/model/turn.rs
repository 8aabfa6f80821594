// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Navigable turns and snapshots.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::ids::NodeId;

/// Author role of a conversation message. Only user turns are navigable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One navigable item: a page node plus its sidebar label.
///
/// A turn's position index is its position in the snapshot vector; indices
/// are recomputed wholesale on every snapshot, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    node: NodeId,
    label: SmolStr,
}

impl Turn {
    pub fn new(node: NodeId, label: impl Into<SmolStr>) -> Self {
        Self { node, label: label.into() }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// An ordered list of turns produced by a [`TurnSource`](crate::source::TurnSource).
///
/// Snapshots are replaced wholesale; the tracker decides whether a new
/// snapshot is a real change by comparing label sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnSnapshot {
    turns: Vec<Turn>,
}

impl TurnSnapshot {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }

    /// True when `other` has the same count and the same labels in the same
    /// order. Node identity is deliberately ignored: a page that re-renders
    /// identical content should not disturb the active index.
    pub fn labels_match(&self, other: &[Turn]) -> bool {
        self.turns.len() == other.len()
            && self
                .turns
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.label() == b.label())
    }
}

#[cfg(test)]
mod tests {
    use super::{Turn, TurnSnapshot};
    use crate::model::NodeId;

    fn snap(labels: &[&str]) -> TurnSnapshot {
        TurnSnapshot::new(
            labels
                .iter()
                .enumerate()
                .map(|(i, label)| Turn::new(NodeId::new(i as u64), *label))
                .collect(),
        )
    }

    #[test]
    fn labels_match_ignores_node_identity() {
        let a = snap(&["1. hi", "2. there"]);
        let relabeled = vec![
            Turn::new(NodeId::new(90), "1. hi"),
            Turn::new(NodeId::new(91), "2. there"),
        ];
        assert!(a.labels_match(&relabeled));
    }

    #[test]
    fn labels_match_rejects_count_or_text_changes() {
        let a = snap(&["1. hi", "2. there"]);
        assert!(!a.labels_match(snap(&["1. hi"]).turns()));
        assert!(!a.labels_match(snap(&["1. hi", "2. where"]).turns()));
    }
}
