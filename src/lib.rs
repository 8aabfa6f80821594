// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Meridian — viewport-driven turn navigation.
//!
//! The core ([`track`]) owns the "active turn" of a long scrollable
//! conversation page and arbitrates between scroll-position inference and
//! explicit navigation commands. [`host`] abstracts the page, [`source`]
//! extracts navigable turns, and [`tui`] is an interactive demo host.

pub mod host;
pub mod model;
pub mod source;
pub mod track;
pub mod tui;
