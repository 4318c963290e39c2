//! # ChatRS Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the ChatRS terminal client.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and building the bot handle
//! - Handing the bot to the interactive session loop
//!
//! ## Architecture
//!
//! The bot handle is created exactly once, here, and lent to the session loop
//! for the rest of the process. Startup failures (bad configuration, storage
//! that cannot be opened) are reported and exit with status 1. Once the session
//! is running, every way of leaving it (exit word, Ctrl+C, end of input) exits
//! with status 0. The Ctrl+C listener is installed first, so an interrupt while
//! the bot is training or answering still ends with the farewell.
//!
//! The `--help`/`--version` checks live in `tests/main_tests.rs`.
//!
//! ## Examples
//!
//! ```bash
//! # Start chatting with the default bot
//! chatrs
//!
//! # Use a specific configuration file and show debug logs on stderr
//! chatrs -vv --config ./chatrs.toml
//! ```
//!
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod bot; // Bot engine: factory, storage, strategies, corpora
mod common; // Shared utilities (fs, ui)
mod core; // Core infrastructure (errors, config)
mod session; // Interactive session loop

use crate::bot::factory;
use crate::core::{config, error::Result};
use crate::session::input::TerminalInput;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "chatrs",
    about = "ChatRS: chat with a trainable best-match bot in your terminal",
    long_about = "Starts an interactive chat session. The bot remembers what it learns\n\
                  in a local SQLite file and can be trained from bundled corpora.\n\
                  Type 'quit', 'exit', 'bye' or 'goodbye' to leave.",
    version
)]
struct Cli {
    /// Read settings from this file instead of the user/project config files.
    #[arg(short, long, env = "CHATRS_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Increase log verbosity on stderr (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("chatrs failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    session::interrupt::install()?;

    let mut stdout = std::io::stdout();
    common::ui::print_banner(&mut stdout)?;

    let cfg = config::load_config(cli.config.as_deref())?;
    let mut chatbot =
        factory::create_chatbot(&cfg.bot).context("Failed to create the chatbot")?;
    tracing::info!("Bot '{}' is ready", chatbot.name());

    let mut input = TerminalInput::new()?;
    let end = session::run_session(
        &mut chatbot,
        &mut input,
        &mut stdout,
        &cfg.training.corpora,
    )?;
    tracing::debug!("Session finished with {:?}", end);
    Ok(())
}
