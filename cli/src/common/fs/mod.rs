//! # ChatRS Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! Filesystem helpers. Import from the submodule directly, e.g.
//! `use crate::common::fs::io::ensure_dir_exists;`.
//!

/// Basic file I/O operations (e.g., `ensure_dir_exists`).
pub mod io;
