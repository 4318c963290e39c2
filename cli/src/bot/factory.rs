//! # ChatRS Bot Factory
//!
//! File: cli/src/bot/factory.rs
//! Author: Christi Mahu
//!
//! Builds the bot handle from a validated `BotConfig`: opens the statement
//! store named by `storage_target` and constructs the configured response
//! strategy. Any failure is returned to the caller untouched.
//!
use crate::bot::chatbot::ChatBot;
use crate::bot::logic::build_strategy;
use crate::bot::storage::SqlStorage;
use crate::core::config::BotConfig;
use crate::core::error::BotResult;
use tracing::info;

/// Creates the bot handle described by `config`.
pub fn create_chatbot(config: &BotConfig) -> BotResult<ChatBot> {
    config.validate()?;
    let storage = SqlStorage::open(&config.storage_target)?;
    let strategy = build_strategy(&config.strategy)?;
    let bot = ChatBot::new(config.identity.clone(), Box::new(storage), strategy);
    info!(
        "Created bot '{}' using strategy '{}' (threshold {:.2}); {} known statements",
        bot.name(),
        config.strategy.name,
        config.strategy.maximum_similarity_threshold,
        bot.known_statements()?
    );
    Ok(bot)
}
