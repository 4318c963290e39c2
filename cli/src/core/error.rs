//! # ChatRS Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout the ChatRS application.
//! There are two layers:
//!
//! - `ChatError`: A `thiserror` enum for everything the bot engine can fail with
//!   (configuration, storage, corpus lookup, strategy selection).
//! - `Result<T>`: A type alias for `anyhow::Result<T>` used by application plumbing
//!   (startup, config loading, terminal I/O) where context matters more than the type.
//!
//! Bot operations (`train`, `respond`) return `BotResult<T>`, which carries a
//! `ChatError` directly. The session loop relies on that: a `ChatError` coming out
//! of the bot is reported to the user and the conversation continues, while any
//! other error (for example a broken stdout) ends the program.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type from the engine
//! if !(0.0..=1.0).contains(&threshold) {
//!     return Err(ChatError::Config(format!("threshold out of range: {}", threshold)));
//! }
//!
//! // Add context to errors using anyhow in application code
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the ChatRS bot engine.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Storage error: {source}")]
    Storage {
        #[from]
        source: rusqlite::Error,
    },

    #[error("Unknown corpus '{name}'.")]
    UnknownCorpus { name: String },

    #[error("Failed to parse corpus '{name}': {source}")]
    CorpusParse {
        name: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Corpus '{name}' could not be read: {source}")]
    CorpusIo {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown response strategy '{name}'.")]
    UnknownStrategy { name: String },
}

/// Result type returned by bot engine operations.
pub type BotResult<T> = std::result::Result<T, ChatError>;

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
