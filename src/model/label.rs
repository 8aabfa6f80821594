// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Sidebar label building.
//!
//! A label is the only piece of message content the navigator keeps: runs of
//! whitespace collapse to a single space, overlong text is cut at a char
//! boundary, and every label carries a 1-based ordinal prefix so the sidebar
//! reads as a numbered outline.

use smol_str::SmolStr;

/// Maximum number of characters of message text kept in a label.
pub const LABEL_MAX_CHARS: usize = 50;

const EMPTY_PLACEHOLDER: &str = "(empty)";
const ELLIPSIS: char = '…';

/// Builds the display label for the turn at 1-based position `ordinal`.
pub fn build_label(ordinal: usize, text: &str) -> SmolStr {
    let mut ordinal_buf = itoa::Buffer::new();
    let mut label = String::with_capacity(LABEL_MAX_CHARS + 8);
    label.push_str(ordinal_buf.format(ordinal));
    label.push_str(". ");

    let collapsed = collapse_whitespace(text);
    if collapsed.is_empty() {
        label.push_str(EMPTY_PLACEHOLDER);
        return SmolStr::new(label);
    }

    let mut chars = 0usize;
    let mut cut = collapsed.len();
    for (byte_pos, _) in collapsed.char_indices() {
        if chars == LABEL_MAX_CHARS {
            cut = byte_pos;
            break;
        }
        chars += 1;
    }

    label.push_str(&collapsed[..cut]);
    if cut < collapsed.len() {
        label.push(ELLIPSIS);
    }
    SmolStr::new(label)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len().min(LABEL_MAX_CHARS * 4));
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
