//! # ChatRS UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Fixed terminal text for the chat client: the horizontal rule, the welcome
//! banner, and the "ready" notice. Everything writes to a caller-supplied
//! `Write` so the session can be driven against an in-memory buffer in tests.
//!
//! ```rust
//! use crate::common::ui;
//!
//! let mut stdout = std::io::stdout();
//! ui::print_banner(&mut stdout)?;
//! ```
//!
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;

/// A line of `=` used to frame banners.
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Prints the welcome banner shown before the bot is created.
pub fn print_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "Welcome to the ChatRS Terminal Client!")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "\nInitializing chatbot...")?;
    out.flush()
}

/// Prints the notice shown once the bot is ready to chat.
pub fn print_ready(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{}", rule())?;
    writeln!(
        out,
        "Chatbot is ready! Type 'quit' or 'exit' to end the conversation."
    )?;
    writeln!(out, "{}\n", rule())?;
    out.flush()
}
