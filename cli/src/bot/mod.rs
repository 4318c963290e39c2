//! # ChatRS Bot Engine
//!
//! File: cli/src/bot/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything behind the `Responder` boundary. The session loop only ever sees a
//! value implementing `Responder`; how responses are picked and where knowledge
//! is kept stays inside this module.
//!
//! ## Architecture
//!
//! - `factory`: builds a `ChatBot` from the `[bot]` configuration.
//! - `chatbot`: the bot handle; implements `Responder`.
//! - `storage`: the statement store (`StatementStore` trait, SQLite implementation).
//! - `logic`: response strategies (`best_match`).
//! - `similarity`: text similarity scoring used by `best_match`.
//! - `corpus`: bundled and on-disk training corpora.
//! - `trainer`: writes corpora into a statement store.
//!
use crate::core::error::BotResult;

pub mod chatbot;
pub mod corpus;
pub mod factory;
pub mod logic;
pub mod similarity;
pub mod storage;
pub mod trainer;

/// The two operations the session loop needs from a bot.
///
/// Both may fail with a `ChatError`; the loop reports those and keeps going.
pub trait Responder {
    /// Seeds the bot's knowledge from the named corpora.
    fn train(&mut self, corpora: &[String]) -> BotResult<()>;

    /// Returns the bot's reply to `text`.
    fn respond(&mut self, text: &str) -> BotResult<String>;
}
