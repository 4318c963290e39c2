//! # ChatRS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs the
//! compiled `chatrs` binary inside its own temporary directory, which serves as
//! the working directory (so `database.sqlite3` lands there) and as `HOME` /
//! `XDG_CONFIG_HOME` (so no real user configuration leaks into the test).
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;
use std::process::Stdio;

/// Default fallback text of the stock bot.
pub const FALLBACK: &str = "I am sorry, I do not understand.";
/// Farewell printed whenever a session ends.
pub const FAREWELL: &str = "bot: Goodbye! Have a great day!";
/// Prompt shown before each user message.
pub const USER_PROMPT: &str = "user: ";
/// Prompt asking whether to train.
pub const TRAIN_PROMPT: &str = "Do you want to train the chatbot? (yes/no): ";

/// # Get ChatRS Command (`chatrs_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `chatrs` binary.
///
/// ## Panics
/// Panics if the `chatrs` binary cannot be found via `Command::cargo_bin`.
pub fn chatrs_cmd() -> Command {
    Command::cargo_bin("chatrs").expect("Failed to find chatrs binary for testing")
}

/// # Sandboxed ChatRS Command (`chatrs_in`)
///
/// Like `chatrs_cmd`, but isolated inside `dir`: working directory, home and
/// config directory all point there, and inherited ChatRS/log settings are cleared.
pub fn chatrs_in(dir: &Path) -> Command {
    let mut cmd = chatrs_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("CHATRS_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// # Spawnable ChatRS Process (`chatrs_process`)
///
/// Same sandbox as `chatrs_in`, but as a `std::process::Command` with piped
/// stdio, for tests that need to talk to a running session.
pub fn chatrs_process(dir: &Path) -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatrs"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("CHATRS_CONFIG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}
