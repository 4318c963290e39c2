//! # ChatRS Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used by the bot engine. Errors are reported
//! as `ChatError::FileSystem` so that a failure while preparing storage reaches
//! the user with the path that caused it.
//!
//! ```rust
//! use crate::common::fs::io;
//! use std::path::Path;
//!
//! io::ensure_dir_exists(Path::new("./data"))?;
//! ```
//!
use crate::core::error::{BotResult, ChatError};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, the directory is created along with any missing
/// parents (like `mkdir -p`). If the path exists but is not a directory, an error
/// (`ChatError::FileSystem`) is returned.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> BotResult<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| {
            ChatError::FileSystem(format!("Failed to create directory {:?}: {}", path, e))
        })?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        return Err(ChatError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}
