//! # ChatRS Response Strategies
//!
//! File: cli/src/bot/logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A response strategy decides what the bot says back. It is selected by name
//! from the `[bot.strategy]` config section via `build_strategy`.
//!
//! Only `best_match` is available. It scans every stored statement that has at
//! least one recorded response, scores it against the input with
//! `similarity::similarity`, and stops early as soon as a candidate reaches the
//! configured threshold. When the best score stays below the threshold, or the
//! matched statement turns out to have no responses, the configured fallback
//! text is returned with a confidence of `0.0`.
//!
use crate::bot::similarity::similarity;
use crate::bot::storage::StatementStore;
use crate::core::config::{StrategyConfig, STRATEGY_BEST_MATCH};
use crate::core::error::{BotResult, ChatError};
use tracing::debug;

/// What a strategy chose to say.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub text: String,
    /// Similarity between the input and the statement that was matched.
    pub confidence: f64,
    /// The stored statement the input was matched against, if any.
    pub matched: Option<String>,
}

impl Response {
    fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            confidence: 0.0,
            matched: None,
        }
    }
}

/// Picks a response for an input from the statements in a store.
pub trait ResponseStrategy {
    fn name(&self) -> &str;
    fn process(&self, input: &str, store: &dyn StatementStore) -> BotResult<Response>;
}

/// Builds the strategy named in the config.
pub fn build_strategy(config: &StrategyConfig) -> BotResult<Box<dyn ResponseStrategy>> {
    match config.name.as_str() {
        STRATEGY_BEST_MATCH => Ok(Box::new(BestMatch::new(
            config.default_response.clone(),
            config.maximum_similarity_threshold,
        ))),
        other => Err(ChatError::UnknownStrategy {
            name: other.to_string(),
        }),
    }
}

/// Returns the first known response to the most similar stored statement.
#[derive(Debug, Clone)]
pub struct BestMatch {
    default_response: String,
    threshold: f64,
}

impl BestMatch {
    pub fn new(default_response: String, threshold: f64) -> Self {
        Self {
            default_response,
            threshold,
        }
    }
}

impl ResponseStrategy for BestMatch {
    fn name(&self) -> &str {
        STRATEGY_BEST_MATCH
    }

    fn process(&self, input: &str, store: &dyn StatementStore) -> BotResult<Response> {
        let mut best: Option<(String, f64)> = None;
        for candidate in store.candidates()? {
            let confidence = similarity(input, &candidate);
            let improves = best.as_ref().map_or(true, |(_, c)| confidence > *c);
            if improves {
                best = Some((candidate, confidence));
            }
            if confidence >= self.threshold {
                break;
            }
        }

        if let Some((matched, confidence)) = best {
            debug!(
                "Closest match for {:?} is {:?} (confidence {:.2})",
                input, matched, confidence
            );
            if confidence >= self.threshold {
                if let Some(first) = store.responses_to(&matched)?.into_iter().next() {
                    debug!(
                        "Answering with statement #{} from {} (stored {}, in response to {:?})",
                        first.id, first.conversation, first.created_at, first.in_response_to
                    );
                    return Ok(Response {
                        text: first.text,
                        confidence,
                        matched: Some(matched),
                    });
                }
            }
        }

        debug!("No statement cleared threshold {:.2}; using fallback", self.threshold);
        Ok(Response::fallback(&self.default_response))
    }
}
