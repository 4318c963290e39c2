//! # ChatRS Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for ChatRS, handling loading,
//! merging, validation, and access to configuration data. Every setting has a
//! built-in default, so running `chatrs` without any config file gives the stock
//! bot: identity `ChatBot`, SQLite storage in `./database.sqlite3`, and the
//! `best_match` strategy with a 0.90 similarity threshold.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (or `CHATRS_CONFIG`); when given,
//!    no other file is consulted.
//! 2. Project-specific `.chatrs.toml` in the current directory or ancestors
//!    (the search stops at a directory containing `.git`).
//! 3. User-specific `<config dir>/chatrs/config.toml`.
//! 4. Default values defined in the code.
//!
//! After merging, `~` in the storage target is expanded and the bot settings are
//! validated (`BotConfig::validate`) before anything is handed to the factory.
//!
//! ## Examples
//!
//! ```toml
//! [bot]
//! name = "ChatBot"
//! storage = "sqlite:///~/.local/share/chatrs/database.sqlite3"
//!
//! [bot.strategy]
//! name = "best_match"
//! default_response = "I am sorry, I do not understand."
//! maximum_similarity_threshold = 0.90
//!
//! [training]
//! corpora = ["chatrs.corpus.english.greetings", "./my_corpus"]
//! ```
//!
use crate::core::error::{BotResult, ChatError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the only response strategy shipped with ChatRS.
pub const STRATEGY_BEST_MATCH: &str = "best_match";

/// Prefix marking a SQLite storage URI.
pub const SQLITE_URI_PREFIX: &str = "sqlite://";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub training: TrainingConfig,
}

/// Everything the bot factory needs to construct a bot handle.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(rename = "name", default = "default_identity")]
    pub identity: String,
    /// Where statements are persisted (`sqlite:///path`, `sqlite://` for memory, or a bare path).
    #[serde(rename = "storage", default = "default_storage_target")]
    pub storage_target: String,
    #[serde(default)]
    pub strategy: StrategyConfig,
}

/// The matching policy used to pick a response.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StrategyConfig {
    #[serde(default = "default_strategy_name")]
    pub name: String,
    /// Returned when no known statement is similar enough to the input.
    #[serde(default = "default_response")]
    pub default_response: String,
    /// Minimum similarity (0.0 - 1.0) a stored statement needs to count as a match.
    #[serde(default = "default_similarity_threshold")]
    pub maximum_similarity_threshold: f64,
}

/// Corpora used when the operator agrees to train the bot.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TrainingConfig {
    #[serde(default = "default_corpora")]
    pub corpora: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
            storage_target: default_storage_target(),
            strategy: StrategyConfig::default(),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: default_strategy_name(),
            default_response: default_response(),
            maximum_similarity_threshold: default_similarity_threshold(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            corpora: default_corpora(),
        }
    }
}

impl BotConfig {
    /// Checks the settings the factory relies on.
    pub fn validate(&self) -> BotResult<()> {
        if self.identity.trim().is_empty() {
            return Err(ChatError::Config("Bot name cannot be empty.".to_string()));
        }
        if self.storage_target.trim().is_empty() {
            return Err(ChatError::Config(
                "Storage target cannot be empty.".to_string(),
            ));
        }
        if self.strategy.name != STRATEGY_BEST_MATCH {
            return Err(ChatError::UnknownStrategy {
                name: self.strategy.name.clone(),
            });
        }
        if self.strategy.default_response.trim().is_empty() {
            return Err(ChatError::Config(
                "Strategy default_response cannot be empty.".to_string(),
            ));
        }
        let threshold = self.strategy.maximum_similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ChatError::Config(format!(
                "maximum_similarity_threshold must be between 0.0 and 1.0, got {}.",
                threshold
            )));
        }
        Ok(())
    }
}

fn default_identity() -> String {
    "ChatBot".to_string()
}
fn default_storage_target() -> String {
    "sqlite:///database.sqlite3".to_string()
}
fn default_strategy_name() -> String {
    STRATEGY_BEST_MATCH.to_string()
}
fn default_response() -> String {
    "I am sorry, I do not understand.".to_string()
}
fn default_similarity_threshold() -> f64 {
    0.90
}
fn default_corpora() -> Vec<String> {
    vec![
        "chatrs.corpus.english.greetings".to_string(),
        "chatrs.corpus.english.conversations".to_string(),
        "chatrs.corpus.english.humor".to_string(),
    ]
}

const PROJECT_CONFIG_FILENAME: &str = ".chatrs.toml";

/// Loads, merges, expands and validates the configuration.
///
/// When `explicit_path` is set, only that file is read and it must exist.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config> {
    let mut config: Config = match explicit_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let mut layered = load_user_config()?.unwrap_or_default();
            if let Some(project) = load_project_config()? {
                merge_tables(&mut layered, project);
            }
            toml::Value::Table(layered)
                .try_into()
                .context("Failed to combine user and project configuration")?
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<toml::Table>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ChatRS", "chatrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_layer_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<toml::Table>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_layer_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.chatrs.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(find_project_config_from(&current_dir))
}

fn find_project_config_from(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Reads one config layer as a raw table, rejecting files that are not a valid
/// config on their own.
fn load_layer_from_path(path: &Path) -> Result<toml::Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let table: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    toml::Value::Table(table.clone())
        .try_into::<Config>()
        .with_context(|| format!("Invalid configuration in file: {}", path.display()))?;
    Ok(table)
}

/// Overlays `overlay` onto `base`. Every key present in `overlay` wins, nested
/// tables are merged key by key.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(nested) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, nested);
                continue;
            }
            base.insert(key, toml::Value::Table(nested));
        } else {
            base.insert(key, value);
        }
    }
}

fn expand_config_paths(config: &mut Config) {
    config.bot.storage_target = expand_storage_target(&config.bot.storage_target);
    debug!("Expanded storage target: {}", config.bot.storage_target);
}

/// Expands `~` in the path part of a storage target, keeping any `sqlite:///` prefix.
pub fn expand_storage_target(target: &str) -> String {
    let file_prefix = format!("{}/", SQLITE_URI_PREFIX);
    match target.strip_prefix(&file_prefix) {
        Some(path) => format!("{}{}", file_prefix, shellexpand::tilde(path)),
        None if target.starts_with(SQLITE_URI_PREFIX) => target.to_string(),
        None => shellexpand::tilde(target).into_owned(),
    }
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    config.bot.validate()?;
    if config.training.corpora.iter().any(|c| c.trim().is_empty()) {
        anyhow::bail!(ChatError::Config(
            "Training corpora cannot contain empty identifiers.".to_string()
        ));
    }
    info!("Configuration validation successful.");
    Ok(())
}
