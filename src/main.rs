// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Meridian CLI entrypoint.
//!
//! Runs the interactive TUI demo against a transcript file (JSON array of
//! `{role, text}` objects, or plain text with `user:` / `assistant:` header
//! lines). `--demo` uses a built-in transcript.

use std::error::Error;
use std::fs;
use std::time::Duration;

use meridian::source::parse_transcript;
use meridian::tui::{self, RunOptions};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <transcript> [--nested] [--tick-ms <n>]\n  {program} --demo [--nested] [--tick-ms <n>]\n\nThe transcript is either a JSON array of {{\"role\", \"text\"}} objects or\nplain text where `user:` / `assistant:` lines start a message.\n\n  --nested      host the conversation in a nested scroll region\n  --tick-ms <n> event poll timeout per frame (1-1000, default 16)"
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    transcript: Option<String>,
    nested: bool,
    tick_ms: Option<u64>,
}

impl CliOptions {
    fn run_options(&self) -> RunOptions {
        let mut options = RunOptions { nested: self.nested, ..RunOptions::default() };
        if let Some(ms) = self.tick_ms {
            options.tick = Duration::from_millis(ms);
        }
        options
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--nested" => {
                if options.nested {
                    return Err(());
                }
                options.nested = true;
            }
            "--tick-ms" => {
                if options.tick_ms.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let ms: u64 = raw.parse().map_err(|_| ())?;
                if !(1..=1000).contains(&ms) {
                    return Err(());
                }
                options.tick_ms = Some(ms);
            }
            "--help" | "-h" => return Err(()),
            other => {
                if other.starts_with('-') || options.transcript.is_some() {
                    return Err(());
                }
                options.transcript = Some(other.to_string());
            }
        }
    }

    if options.demo == options.transcript.is_some() {
        // Exactly one of --demo or a transcript path.
        return Err(());
    }
    Ok(options)
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "meridian".to_string());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    let transcript = if options.demo {
        tui::demo_transcript()
    } else {
        let path = options.transcript.as_deref().unwrap_or_default();
        let raw = fs::read_to_string(path)?;
        parse_transcript(&raw)?
    };

    tui::run(transcript, options.run_options())
}
