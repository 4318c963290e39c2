//! # Interrupt Handling
//!
//! File: cli/src/session/interrupt.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! While rustyline owns a terminal prompt, Ctrl+C arrives as a key press and is
//! reported through `InputEvent::Interrupted`. Everywhere else (the bot is
//! training or answering, or stdin is a pipe) it arrives as SIGINT.
//! `install` registers a SIGINT listener on a dedicated thread running a small
//! current-thread tokio runtime; when the signal fires it prints the farewell
//! and ends the process with status 0.
//!
//! The listener is registered before `install` returns, so an interrupt at any
//! later point is covered.
//!
use crate::core::error::Result;
use crate::session;
use anyhow::Context;
use std::io::Write;
use tracing::info;

/// Installs the process-wide SIGINT listener.
pub fn install() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build signal runtime")?;

    #[cfg(unix)]
    let mut interrupts = {
        let _guard = runtime.enter();
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
            .context("Failed to install Ctrl+C handler")?
    };

    std::thread::Builder::new()
        .name("chatrs-sigint".into())
        .spawn(move || {
            runtime.block_on(async {
                #[cfg(unix)]
                interrupts.recv().await;

                #[cfg(not(unix))]
                if tokio::signal::ctrl_c().await.is_err() {
                    std::future::pending::<()>().await;
                }
            });
            info!("Received Ctrl+C, ending session");
            let mut stdout = std::io::stdout().lock();
            let _ = session::write_interrupted_farewell(&mut stdout);
            let _ = stdout.flush();
            std::process::exit(0);
        })
        .context("Failed to spawn Ctrl+C listener")?;
    Ok(())
}
