//! # ChatRS Training Corpora
//!
//! File: cli/src/bot/corpus.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A corpus is a set of short scripted conversations used to seed the bot's
//! statement store. Corpora are TOML files:
//!
//! ```toml
//! categories = ["greetings"]
//! conversations = [
//!     ["Hello", "Hi"],
//!     ["How are you?", "I am doing well, how about you?", "I am also good."],
//! ]
//! ```
//!
//! ## Identifiers
//!
//! `resolve` turns a corpus identifier into one or more parsed corpora:
//! - `chatrs.corpus.english.<name>`: a corpus compiled into the binary.
//! - `chatrs.corpus.english`: every bundled English corpus.
//! - anything else: a path to a `.toml` file, or to a directory that is walked
//!   recursively for `.toml` files (in sorted order).
//!
//! Identifiers that match none of these fail with `ChatError::UnknownCorpus`.
//!
use crate::core::error::{BotResult, ChatError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

const BUILTIN_PREFIX: &str = "chatrs.corpus.english";

/// Corpora shipped inside the binary, keyed by identifier.
const BUILTIN_CORPORA: &[(&str, &str)] = &[
    (
        "chatrs.corpus.english.greetings",
        include_str!("../../corpus/english/greetings.toml"),
    ),
    (
        "chatrs.corpus.english.conversations",
        include_str!("../../corpus/english/conversations.toml"),
    ),
    (
        "chatrs.corpus.english.humor",
        include_str!("../../corpus/english/humor.toml"),
    ),
];

/// A parsed corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    /// Identifier or file path the corpus was loaded from.
    pub name: String,
    pub categories: Vec<String>,
    pub conversations: Vec<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CorpusFile {
    #[serde(default)]
    categories: Vec<String>,
    conversations: Vec<Vec<String>>,
}

impl Corpus {
    pub fn parse(name: &str, content: &str) -> BotResult<Self> {
        let file: CorpusFile = toml::from_str(content).map_err(|source| ChatError::CorpusParse {
            name: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            categories: file.categories,
            conversations: file.conversations,
        })
    }

    /// Total number of lines across all conversations.
    pub fn statement_count(&self) -> usize {
        self.conversations.iter().map(Vec::len).sum()
    }
}

/// Resolves a corpus identifier to the corpora it refers to.
pub fn resolve(identifier: &str) -> BotResult<Vec<Corpus>> {
    if identifier == BUILTIN_PREFIX {
        return BUILTIN_CORPORA
            .iter()
            .map(|(name, content)| Corpus::parse(name, content))
            .collect();
    }
    if let Some((name, content)) = BUILTIN_CORPORA.iter().find(|(name, _)| *name == identifier) {
        return Ok(vec![Corpus::parse(name, content)?]);
    }

    let path = Path::new(identifier);
    if path.is_file() {
        return Ok(vec![load_file(path)?]);
    }
    if path.is_dir() {
        return load_directory(identifier, path);
    }
    Err(ChatError::UnknownCorpus {
        name: identifier.to_string(),
    })
}

fn load_file(path: &Path) -> BotResult<Corpus> {
    let name = path.display().to_string();
    debug!("Reading corpus file {}", name);
    let content = fs::read_to_string(path).map_err(|source| ChatError::CorpusIo {
        name: name.clone(),
        source,
    })?;
    Corpus::parse(&name, &content)
}

fn load_directory(identifier: &str, dir: &Path) -> BotResult<Vec<Corpus>> {
    let mut corpora = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| ChatError::CorpusIo {
            name: identifier.to_string(),
            source: e.into(),
        })?;
        let is_toml = entry.path().extension().is_some_and(|ext| ext == "toml");
        if entry.file_type().is_file() && is_toml {
            corpora.push(load_file(entry.path())?);
        }
    }
    if corpora.is_empty() {
        return Err(ChatError::UnknownCorpus {
            name: identifier.to_string(),
        });
    }
    Ok(corpora)
}
