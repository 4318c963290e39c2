//! # ChatRS Bot Handle
//!
//! File: cli/src/bot/chatbot.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `ChatBot` ties a statement store to a response strategy and implements the
//! `Responder` capability used by the session loop.
//!
//! Every call to `respond` also teaches the bot: the input is stored in response
//! to the bot's previous reply in this session, and the chosen reply is stored in
//! response to the input. Fallback replies are not stored, so the bot does not
//! learn to answer with "I do not understand".
//!
use crate::bot::logic::ResponseStrategy;
use crate::bot::storage::{NewStatement, StatementStore};
use crate::bot::trainer::train_from_corpora;
use crate::bot::Responder;
use crate::core::error::BotResult;
use chrono::Utc;
use tracing::{debug, info};

pub struct ChatBot {
    name: String,
    storage: Box<dyn StatementStore>,
    strategy: Box<dyn ResponseStrategy>,
    /// Label attached to statements learned during this session.
    conversation: String,
    previous_response: Option<String>,
}

impl ChatBot {
    pub fn new(
        name: String,
        storage: Box<dyn StatementStore>,
        strategy: Box<dyn ResponseStrategy>,
    ) -> Self {
        Self {
            name,
            storage,
            strategy,
            conversation: format!("session:{}", Utc::now().format("%Y%m%dT%H%M%S")),
            previous_response: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of statements the bot currently knows.
    pub fn known_statements(&self) -> BotResult<usize> {
        self.storage.count()
    }
}

impl Responder for ChatBot {
    fn train(&mut self, corpora: &[String]) -> BotResult<()> {
        let summary = train_from_corpora(self.storage.as_mut(), corpora)?;
        info!(
            "{} trained on {} corpora ({} statements)",
            self.name, summary.corpora, summary.statements
        );
        Ok(())
    }

    fn respond(&mut self, text: &str) -> BotResult<String> {
        let response = self.strategy.process(text, self.storage.as_ref())?;
        debug!(
            "Strategy '{}' answered with confidence {:.2}",
            self.strategy.name(),
            response.confidence
        );

        self.storage.create(NewStatement {
            text,
            in_response_to: self.previous_response.as_deref(),
            conversation: &self.conversation,
        })?;
        if response.matched.is_some() {
            self.storage.create(NewStatement {
                text: &response.text,
                in_response_to: Some(text),
                conversation: &self.conversation,
            })?;
        }

        self.previous_response = Some(response.text.clone());
        Ok(response.text)
    }
}
