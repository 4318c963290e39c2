//! # ChatRS Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers that are not specific to the bot engine or the session loop:
//!
//! - **`fs`**: filesystem helpers such as `ensure_dir_exists`, used when opening storage.
//! - **`ui`**: fixed terminal text (banner, rule, ready notice).
//!

/// Utilities for filesystem operations.
pub mod fs;
/// Utilities for terminal text shown around the conversation.
pub mod ui;
