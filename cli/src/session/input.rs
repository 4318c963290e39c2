//! # Session Input
//!
//! File: cli/src/session/input.rs
//! Author: Christi Mahu
//!
//! Line input for the chat session. `TerminalInput` wraps a `rustyline` editor
//! so the prompt gets line editing and history, and maps the editor's Ctrl+C
//! and Ctrl+D results onto `InputEvent` variants the session loop can act on.
//! When stdin is not a terminal (piped input), rustyline falls back to plain
//! line reads that never show the prompt, so `TerminalInput` writes the prompt
//! to stdout itself before reading.
//!
use crate::core::error::Result;
use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{IsTerminal, Write};
use tracing::debug;

/// What happened when the session asked for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line of text, without the trailing newline.
    Line(String),
    /// The operator pressed Ctrl+C.
    Interrupted,
    /// Input ended (Ctrl+D or a closed stdin).
    Eof,
}

/// A source of prompted lines.
pub trait LineSource {
    /// Shows `prompt` and blocks until a line, an interrupt, or end of input.
    fn read_line(&mut self, prompt: &str) -> Result<InputEvent>;
}

/// Interactive terminal input backed by `rustyline`.
pub struct TerminalInput {
    editor: DefaultEditor,
    /// False when stdin is piped; rustyline then does not draw the prompt.
    interactive: bool,
}

impl TerminalInput {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to initialise line editor")?;
        let interactive = std::io::stdin().is_terminal();
        debug!("Line editor ready (interactive: {})", interactive);
        Ok(Self {
            editor,
            interactive,
        })
    }
}

/// Writes `prompt` without a newline and flushes it so it shows before the read.
fn show_prompt<W: Write>(out: &mut W, prompt: &str) -> std::io::Result<()> {
    out.write_all(prompt.as_bytes())?;
    out.flush()
}

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<InputEvent> {
        if !self.interactive {
            show_prompt(&mut std::io::stdout(), prompt).context("Failed to write prompt")?;
        }
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(InputEvent::Line(line))
            }
            Err(ReadlineError::Interrupted) => {
                debug!("Readline interrupted");
                Ok(InputEvent::Interrupted)
            }
            Err(ReadlineError::Eof) => {
                debug!("Readline reached end of input");
                Ok(InputEvent::Eof)
            }
            Err(e) => Err(e).context("Failed to read from terminal"),
        }
    }
}
