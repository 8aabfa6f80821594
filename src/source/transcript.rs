// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Transcript parsing for the demo binary.
//!
//! Two input shapes: a JSON array of `{ "role": ..., "text": ... }` objects,
//! or plain text where `user:` / `assistant:` header lines open a message
//! and following lines belong to it. The JSON shape is detected by a leading
//! `[`.

use std::error::Error;
use std::fmt;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::model::Role;

/// One message of a conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug)]
pub enum TranscriptError {
    Json(serde_json::Error),
    Pattern(regex::Error),
    /// The input contained no recognizable message at all.
    NoTurns,
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "transcript JSON parse failed: {err}"),
            Self::Pattern(err) => write!(f, "transcript header pattern failed: {err}"),
            Self::NoTurns => f.write_str("transcript contains no messages"),
        }
    }
}

impl Error for TranscriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Pattern(err) => Some(err),
            Self::NoTurns => None,
        }
    }
}

/// Parses either transcript shape.
pub fn parse_transcript(input: &str) -> Result<Vec<TranscriptTurn>, TranscriptError> {
    if input.trim_start().starts_with('[') {
        parse_json(input)
    } else {
        parse_text(input)
    }
}

pub fn parse_json(input: &str) -> Result<Vec<TranscriptTurn>, TranscriptError> {
    let turns: Vec<TranscriptTurn> =
        serde_json::from_str(input).map_err(TranscriptError::Json)?;
    if turns.is_empty() {
        return Err(TranscriptError::NoTurns);
    }
    Ok(turns)
}

pub fn parse_text(input: &str) -> Result<Vec<TranscriptTurn>, TranscriptError> {
    let header = RegexBuilder::new(r"^(user|assistant)\s*:\s*(.*)$")
        .case_insensitive(true)
        .build()
        .map_err(TranscriptError::Pattern)?;

    let mut turns: Vec<TranscriptTurn> = Vec::new();
    for line in input.lines() {
        if let Some(captures) = header.captures(line) {
            let role = match captures[1].to_ascii_lowercase().as_str() {
                "user" => Role::User,
                _ => Role::Assistant,
            };
            turns.push(TranscriptTurn { role, text: captures[2].to_string() });
        } else if let Some(turn) = turns.last_mut() {
            turn.text.push('\n');
            turn.text.push_str(line);
        }
        // Text before the first header is ignored.
    }

    if turns.is_empty() {
        return Err(TranscriptError::NoTurns);
    }
    Ok(turns)
}
