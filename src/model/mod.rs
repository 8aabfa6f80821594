// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Core data model.
//!
//! Turns are the navigable units; a snapshot is the wholesale-replaced list
//! of turns the tracker works against.

pub mod ids;
pub mod label;
pub mod turn;

pub use ids::NodeId;
pub use label::{build_label, LABEL_MAX_CHARS};
pub use turn::{Role, Turn, TurnSnapshot};
