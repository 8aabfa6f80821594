// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Opaque node handles.

use std::fmt;

/// Handle to a node on the host page.
///
/// The core never looks inside a node; it only hands the id back to the
/// [`HostPage`](crate::host::HostPage) for geometry queries. Ids stay valid
/// for the lifetime of the page but the node behind one may detach, in which
/// case geometry queries return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::NodeId;

    #[test]
    fn node_id_round_trips_raw() {
        let id = NodeId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.to_string(), "node:42");
    }
}
