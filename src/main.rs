//! Conf Launcher - starts a program described by a `.conf` file.
//!
//! The file next to the launcher's executable names the target program on its
//! first line and its arguments on the following lines. The launcher hands the
//! resulting command line to a hidden shell and exits.

#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

mod config;
mod launcher;
mod notify;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use launcher::{LaunchOutcome, Launcher};
use notify::{failure_message, DesktopNotifier, Notifier, NOTICE_TITLE};

/// Command-line arguments parser.
///
/// The launcher takes no options; the configuration always lives next to the
/// executable. Only `--help` and `--version` are accepted.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    Args::parse();

    // 1. Resolve the configuration file
    let config_path = match config::default_config_path() {
        Ok(path) => path,
        Err(e) => {
            DesktopNotifier.notify(NOTICE_TITLE, &failure_message(&e));
            return Err(e.into());
        }
    };

    // 2. Run the launch on its own task
    let launcher = Launcher::new(DesktopNotifier);
    let task = tokio::spawn(async move {
        let outcome = launcher.launch(&config_path).await;
        (config_path, outcome)
    });
    let (config_path, outcome) = task.await.context("Launcher task failed")?;

    // 3. Decide how the process ends; failures were already shown to the user
    match outcome.with_context(|| format!("Launch from {:?} failed", config_path))? {
        LaunchOutcome::Dispatched { command } => {
            info!(%command, "[Launch] Dispatched. Exiting.");
        }
        LaunchOutcome::TargetNotFound { target } => {
            info!(program = %target, "[Launch] Nothing to start. Exiting.");
        }
    }

    Ok(())
}
