//! # ChatRS Session Loop
//!
//! File: cli/src/session/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Drives one interactive conversation with a bot handle that was already built
//! by the factory. The loop is synchronous: one blocking read, then at most one
//! blocking call into the bot, then back to reading.
//!
//! ## Workflow
//!
//! 1. Ask whether to train. A reply of `yes` or `y` (any case) trains the bot on
//!    the configured corpora; anything else, including an empty reply, skips it.
//! 2. Print the ready notice.
//! 3. Read lines at the `user: ` prompt:
//!    - `quit`, `exit`, `bye`, `goodbye` (any case, surrounding whitespace
//!      ignored): print the farewell and stop.
//!    - blank lines: prompt again without calling the bot.
//!    - anything else: call `respond` once with the trimmed text and print
//!      `bot: <reply>`.
//! 4. Ctrl+C or end of input at any prompt prints the farewell and stops. A
//!    Ctrl+C that lands while the bot is working is caught by the listener in
//!    `interrupt`, which prints the same farewell and exits with status 0.
//!
//! ## Error Handling
//!
//! A `ChatError` from `train` or `respond` is printed as `Error: <message>` and
//! the session carries on. Errors writing to the terminal or reading from it are
//! not the bot's fault and end the session by propagating to `main`.
//!
use crate::bot::Responder;
use crate::common::ui;
use crate::core::error::Result;
use std::io::Write;
use tracing::{info, warn};

pub mod input;
pub mod interrupt;

use input::{InputEvent, LineSource};

pub const TRAIN_PROMPT: &str = "\nDo you want to train the chatbot? (yes/no): ";
pub const USER_PROMPT: &str = "user: ";
pub const BOT_LABEL: &str = "bot: ";
pub const FAREWELL: &str = "bot: Goodbye! Have a great day!";

const EXIT_WORDS: [&str; 4] = ["quit", "exit", "bye", "goodbye"];
const TRAIN_ANSWERS: [&str; 2] = ["yes", "y"];

/// How a session finished. All of them are clean exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The operator typed an exit word.
    Farewell,
    /// The operator pressed Ctrl+C.
    Interrupted,
    /// Input was closed.
    EndOfInput,
}

/// What a single line of input asks the session to do.
#[derive(Debug, PartialEq, Eq)]
enum Turn<'a> {
    Exit,
    Skip,
    Message(&'a str),
}

fn classify(line: &str) -> Turn<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Turn::Skip
    } else if EXIT_WORDS.contains(&trimmed.to_lowercase().as_str()) {
        Turn::Exit
    } else {
        Turn::Message(trimmed)
    }
}

fn wants_training(reply: &str) -> bool {
    TRAIN_ANSWERS.contains(&reply.trim().to_lowercase().as_str())
}

/// Runs the training prompt and the conversation loop until the operator leaves.
pub fn run_session<B, I, W>(
    bot: &mut B,
    input: &mut I,
    out: &mut W,
    corpora: &[String],
) -> Result<SessionEnd>
where
    B: Responder + ?Sized,
    I: LineSource + ?Sized,
    W: Write,
{
    let reply = match input.read_line(TRAIN_PROMPT)? {
        InputEvent::Line(reply) => reply,
        other => return finish(out, other),
    };

    if wants_training(&reply) {
        writeln!(out, "\nTraining the chatbot. This may take a moment...")?;
        out.flush()?;
        match bot.train(corpora) {
            Ok(()) => writeln!(out, "Training completed!")?,
            Err(e) => {
                warn!("Training failed: {}", e);
                writeln!(out, "Error: {}", e)?;
            }
        }
    } else {
        info!("Training skipped");
    }

    ui::print_ready(out)?;

    loop {
        let line = match input.read_line(USER_PROMPT)? {
            InputEvent::Line(line) => line,
            other => return finish(out, other),
        };

        match classify(&line) {
            Turn::Exit => {
                writeln!(out, "{}", FAREWELL)?;
                out.flush()?;
                return Ok(SessionEnd::Farewell);
            }
            Turn::Skip => continue,
            Turn::Message(text) => match bot.respond(text) {
                Ok(response) => writeln!(out, "{}{}", BOT_LABEL, response)?,
                Err(e) => {
                    warn!("Bot failed to respond to {:?}: {}", text, e);
                    writeln!(out, "Error: {}", e)?;
                }
            },
        }
        out.flush()?;
    }
}

/// Farewell printed after Ctrl+C, on a fresh line below whatever was shown.
pub fn write_interrupted_farewell<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\n\n{}", FAREWELL)
}

/// Prints the farewell for a non-line input event.
fn finish<W: Write>(out: &mut W, event: InputEvent) -> Result<SessionEnd> {
    let end = match event {
        InputEvent::Interrupted => {
            write_interrupted_farewell(out)?;
            SessionEnd::Interrupted
        }
        _ => {
            writeln!(out, "\n{}", FAREWELL)?;
            SessionEnd::EndOfInput
        }
    };
    out.flush()?;
    info!("Session ended: {:?}", end);
    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{BotResult, ChatError};
    use std::collections::VecDeque;

    /// Replays a fixed list of input events, then reports end of input.
    struct ScriptedInput {
        events: VecDeque<InputEvent>,
        prompts: Vec<String>,
    }

    impl ScriptedInput {
        fn lines(lines: &[&str]) -> Self {
            Self::events(lines.iter().map(|l| InputEvent::Line(l.to_string())).collect())
        }

        fn events(events: Vec<InputEvent>) -> Self {
            Self {
                events: events.into(),
                prompts: Vec::new(),
            }
        }
    }

    impl LineSource for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> Result<InputEvent> {
            self.prompts.push(prompt.to_string());
            Ok(self.events.pop_front().unwrap_or(InputEvent::Eof))
        }
    }

    /// Records every call and answers with a canned reply.
    #[derive(Default)]
    struct RecordingBot {
        trained_with: Vec<Vec<String>>,
        asked: Vec<String>,
        fail_on: Option<String>,
        fail_training: bool,
    }

    impl Responder for RecordingBot {
        fn train(&mut self, corpora: &[String]) -> BotResult<()> {
            self.trained_with.push(corpora.to_vec());
            if self.fail_training {
                return Err(ChatError::UnknownCorpus {
                    name: "missing".into(),
                });
            }
            Ok(())
        }

        fn respond(&mut self, text: &str) -> BotResult<String> {
            self.asked.push(text.to_string());
            if self.fail_on.as_deref() == Some(text) {
                return Err(ChatError::Config("storage went away".into()));
            }
            Ok(format!("echo {}", text))
        }
    }

    fn corpora() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into()]
    }

    fn run(bot: &mut RecordingBot, input: &mut ScriptedInput) -> (SessionEnd, String) {
        let mut out = Vec::new();
        let end = run_session(bot, input, &mut out, &corpora()).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_scenario_two_messages_then_quit() {
        let mut bot = RecordingBot::default();
        let mut input = ScriptedInput::lines(&["no", "hello", "how are you", "quit", "unreached"]);

        let (end, out) = run(&mut bot, &mut input);

        assert_eq!(end, SessionEnd::Farewell);
        assert!(bot.trained_with.is_empty());
        assert_eq!(bot.asked, vec!["hello", "how are you"]);
        assert!(out.contains("bot: echo hello\n"));
        assert!(out.contains("bot: echo how are you\n"));
        assert!(out.trim_end().ends_with(FAREWELL));
        assert_eq!(input.events.len(), 1);
    }

    #[test]
    fn test_exit_words_any_case_and_whitespace() {
        for word in ["quit", "QUIT", "Exit", "bye", "GoodBye", "  quit  ", "\tbye"] {
            let mut bot = RecordingBot::default();
            let mut input = ScriptedInput::lines(&["n", word, "never"]);
            let (end, out) = run(&mut bot, &mut input);
            assert_eq!(end, SessionEnd::Farewell, "{:?} should exit", word);
            assert!(bot.asked.is_empty());
            assert!(out.contains(FAREWELL));
        }
    }

    #[test]
    fn test_blank_lines_do_not_reach_bot() {
        let mut bot = RecordingBot::default();
        let mut input = ScriptedInput::lines(&["", "", "   ", "\t", "exit"]);
        let (_, out) = run(&mut bot, &mut input);

        assert!(bot.asked.is_empty());
        assert!(!out.contains("bot: echo"));
        // Training prompt once, then one user prompt per line read.
        assert_eq!(input.prompts[0], TRAIN_PROMPT);
        assert_eq!(input.prompts[1..].iter().filter(|p| *p == USER_PROMPT).count(), 4);
    }

    #[test]
    fn test_message_is_trimmed_and_sent_once() {
        let mut bot = RecordingBot::default();
        let mut input = ScriptedInput::lines(&["no", "  Hello there  ", "bye"]);
        let (_, out) = run(&mut bot, &mut input);
        assert_eq!(bot.asked, vec!["Hello there"]);
        assert_eq!(out.matches("bot: echo").count(), 1);
    }

    #[test]
    fn test_training_only_on_yes_or_y() {
        for (reply, expected) in [
            ("yes", true),
            ("Y", true),
            (" YES ", true),
            ("y", true),
            ("no", false),
            ("", false),
            ("yeah", false),
            ("sure", false),
        ] {
            let mut bot = RecordingBot::default();
            let mut input = ScriptedInput::lines(&[reply, "quit"]);
            let (_, out) = run(&mut bot, &mut input);
            assert_eq!(!bot.trained_with.is_empty(), expected, "reply {:?}", reply);
            assert_eq!(out.contains("Training completed!"), expected);
            if expected {
                assert_eq!(bot.trained_with, vec![corpora()]);
            }
        }
    }

    #[test]
    fn test_respond_error_is_reported_and_loop_continues() {
        let mut bot = RecordingBot {
            fail_on: Some("boom".into()),
            ..Default::default()
        };
        let mut input = ScriptedInput::lines(&["no", "boom", "after", "quit"]);
        let (end, out) = run(&mut bot, &mut input);

        assert_eq!(end, SessionEnd::Farewell);
        assert!(out.contains("Error: Configuration error: storage went away\n"));
        assert!(out.contains("bot: echo after\n"));
        assert_eq!(bot.asked, vec!["boom", "after"]);
    }

    #[test]
    fn test_training_error_is_reported_and_session_continues() {
        let mut bot = RecordingBot {
            fail_training: true,
            ..Default::default()
        };
        let mut input = ScriptedInput::lines(&["yes", "hi", "quit"]);
        let (_, out) = run(&mut bot, &mut input);

        assert!(out.contains("Error: Unknown corpus 'missing'."));
        assert!(!out.contains("Training completed!"));
        assert!(out.contains("Chatbot is ready!"));
        assert_eq!(bot.asked, vec!["hi"]);
    }

    #[test]
    fn test_interrupt_ends_session() {
        let mut bot = RecordingBot::default();
        let mut input = ScriptedInput::events(vec![
            InputEvent::Line("no".into()),
            InputEvent::Line("hello".into()),
            InputEvent::Interrupted,
            InputEvent::Line("never read".into()),
        ]);
        let (end, out) = run(&mut bot, &mut input);

        assert_eq!(end, SessionEnd::Interrupted);
        assert_eq!(bot.asked, vec!["hello"]);
        assert!(out.ends_with(&format!("\n\n{}\n", FAREWELL)));
    }

    #[test]
    fn test_interrupt_at_training_prompt() {
        let mut bot = RecordingBot::default();
        let mut input = ScriptedInput::events(vec![InputEvent::Interrupted]);
        let (end, out) = run(&mut bot, &mut input);

        assert_eq!(end, SessionEnd::Interrupted);
        assert!(bot.trained_with.is_empty());
        assert!(!out.contains("Chatbot is ready!"));
        assert!(out.contains(FAREWELL));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let mut bot = RecordingBot::default();
        let mut input = ScriptedInput::lines(&["no", "hello"]);
        let (end, out) = run(&mut bot, &mut input);

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(bot.asked, vec!["hello"]);
        assert!(out.trim_end().ends_with(FAREWELL));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("  "), Turn::Skip);
        assert_eq!(classify("GOODBYE"), Turn::Exit);
        assert_eq!(classify(" quit now "), Turn::Message("quit now"));
    }
}
