//! # Corpus Trainer
//!
//! File: cli/src/bot/trainer.rs
//! Author: Christi Mahu
//!
//! Loads corpora by identifier and writes their conversations into a statement
//! store. Each conversation becomes a chain where every line is stored in
//! response to the line before it; the first line has no predecessor.
//!
//! All identifiers are resolved before anything is written, so a typo in the
//! last identifier does not leave the store half-trained.
//!
use crate::bot::corpus::{self, Corpus};
use crate::bot::storage::{NewStatement, StatementStore};
use crate::core::error::BotResult;
use tracing::info;

/// Counts reported after a training run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingSummary {
    pub corpora: usize,
    pub conversations: usize,
    pub statements: usize,
}

/// Trains `store` on every corpus named in `identifiers`.
pub fn train_from_corpora(
    store: &mut dyn StatementStore,
    identifiers: &[String],
) -> BotResult<TrainingSummary> {
    let mut corpora = Vec::new();
    for identifier in identifiers {
        corpora.extend(corpus::resolve(identifier)?);
    }

    let mut summary = TrainingSummary::default();
    for corpus in &corpora {
        let written = train_corpus(store, corpus)?;
        info!(
            "Trained on {} [{}] ({} conversations, {} statements)",
            corpus.name,
            corpus.categories.join(", "),
            corpus.conversations.len(),
            written
        );
        summary.corpora += 1;
        summary.conversations += corpus.conversations.len();
        summary.statements += written;
    }
    Ok(summary)
}

fn train_corpus(store: &mut dyn StatementStore, corpus: &Corpus) -> BotResult<usize> {
    let conversation = format!("training:{}", corpus.name);
    let mut statements = Vec::with_capacity(corpus.statement_count());
    for lines in &corpus.conversations {
        let mut previous: Option<&str> = None;
        for line in lines {
            statements.push(NewStatement {
                text: line.as_str(),
                in_response_to: previous,
                conversation: &conversation,
            });
            previous = Some(line.as_str());
        }
    }
    store.create_many(&statements)
}
