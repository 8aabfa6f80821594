// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Turn extraction.
//!
//! A [`TurnSource`] produces the ordered snapshot of navigable turns from
//! the host page; the tracker consumes snapshots wholesale. [`MessageScan`]
//! is the concrete source for the simulated page: user-role messages in
//! document order, labeled per [`crate::model::label`].

pub mod rebuild;
pub mod transcript;

pub use rebuild::{RebuildScheduler, REBUILD_DEBOUNCE};
pub use transcript::{parse_transcript, TranscriptError, TranscriptTurn};

use crate::host::HostPage;
use crate::model::{build_label, Role, Turn, TurnSnapshot};

/// Supplies the current ordered turn list. Must be cheap to call repeatedly;
/// the hosting glue decides when (typically after a debounced rebuild).
pub trait TurnSource<P: HostPage> {
    fn snapshot(&mut self, page: &P) -> TurnSnapshot;
}

/// Scans a simulated page for user-role messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageScan;

impl TurnSource<crate::host::SimPage> for MessageScan {
    fn snapshot(&mut self, page: &crate::host::SimPage) -> TurnSnapshot {
        let turns = page
            .messages()
            .into_iter()
            .filter(|(_, role, _)| *role == Role::User)
            .enumerate()
            .map(|(i, (node, _, text))| Turn::new(node, build_label(i + 1, text)))
            .collect();
        TurnSnapshot::new(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageScan, TurnSource};
    use crate::host::SimPage;
    use crate::model::Role;

    #[test]
    fn scan_keeps_user_turns_in_document_order() {
        let mut page = SimPage::new(600.0);
        page.push_message(None, Role::User, "first question", 100.0);
        page.push_message(None, Role::Assistant, "an answer", 100.0);
        page.push_message(None, Role::User, "followup", 100.0);

        let snapshot = MessageScan.snapshot(&page);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.turns()[0].label(), "1. first question");
        assert_eq!(snapshot.turns()[1].label(), "2. followup");
    }

    #[test]
    fn scan_skips_detached_messages() {
        let mut page = SimPage::new(600.0);
        let first = page.push_message(None, Role::User, "gone", 100.0);
        page.push_message(None, Role::User, "stays", 100.0);
        page.detach(first);

        let snapshot = MessageScan.snapshot(&page);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.turns()[0].label(), "1. stays");
    }
}
