//! Application launcher module.
//!
//! This module turns a loaded configuration into a single command line and
//! hands it to an intermediary shell, which starts the target program and
//! then exits on its own.

use crate::config::{ConfigError, LaunchConfig};
use crate::notify::{failure_message, missing_target_message, Notifier, NOTICE_TITLE};
use crate::shell::{ShellProcess, ShellSpec};
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Directive appended to the command so the shell terminates after starting it.
pub const EXIT_DIRECTIVE: &str = "&exit";

/// Time given to the shell to pick up the command before the launcher returns.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(1000);

/// How a launch attempt ended, when it ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The command line was handed to the shell (delivery is best-effort).
    Dispatched { command: String },
    /// The configured target does not exist; the user has been notified.
    TargetNotFound { target: String },
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to start shell {program}")]
    ShellSpawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Builds `"<target>" arg1 arg2&exit` from the configuration.
///
/// Only the target is quoted. Arguments are joined as-is, so quotes or spaces
/// inside them reach the shell unchanged.
pub fn build_command(config: &LaunchConfig) -> String {
    let mut command = format!("\"{}\"", config.target);
    for arg in &config.args {
        command.push(' ');
        command.push_str(arg);
    }
    command.push_str(EXIT_DIRECTIVE);
    command
}

/// Runs one launch: shell, config, validation, dispatch and grace wait.
pub struct Launcher<N> {
    shell: ShellSpec,
    notifier: N,
    grace_period: Duration,
}

impl<N: Notifier> Launcher<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            shell: ShellSpec::system(),
            notifier,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    #[cfg(test)]
    pub fn with_shell(mut self, shell: ShellSpec) -> Self {
        self.shell = shell;
        self
    }

    #[cfg(test)]
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Launches the target named in the configuration file at `config_path`.
    ///
    /// The shell is started before the configuration is read. It is killed
    /// again if loading or validation fails. Every failure is shown to the
    /// user before it is returned.
    ///
    /// The target must be an existing regular file. Relative targets are
    /// resolved by the shell against the working directory.
    ///
    /// # Returns
    /// * `Ok(Dispatched)` once the command was written and the grace period elapsed
    /// * `Ok(TargetNotFound)` if the first line does not name an existing file
    /// * `Err(_)` if the shell cannot be started or the configuration cannot be loaded
    pub async fn launch(&self, config_path: &Path) -> Result<LaunchOutcome, LaunchError> {
        let mut shell = match ShellProcess::start(&self.shell) {
            Ok(shell) => shell,
            Err(source) => {
                return Err(self.report(LaunchError::ShellSpawn {
                    program: self.shell.program.to_string_lossy().into_owned(),
                    source,
                }))
            }
        };
        debug!(pid = ?shell.id(), "Shell started");

        let config = match LaunchConfig::load(config_path) {
            Ok(config) => config,
            Err(e) => {
                shell.abandon();
                return Err(self.report(e.into()));
            }
        };
        info!(config = %config_path.display(), program = %config.target, "Configuration loaded");

        if !Path::new(&config.target).is_file() {
            warn!(program = %config.target, "Target program does not exist");
            shell.abandon();
            self.notifier
                .notify(NOTICE_TITLE, &missing_target_message(&config.target));
            return Ok(LaunchOutcome::TargetNotFound { target: config.target });
        }

        let command = build_command(&config);
        info!(%command, "Dispatching to shell");
        if let Err(e) = shell.send_line(&command).await {
            warn!(error = %e, "Failed to write command to shell");
        }

        tokio::time::sleep(self.grace_period).await;
        Ok(LaunchOutcome::Dispatched { command })
    }

    fn report(&self, error: LaunchError) -> LaunchError {
        let message = failure_message(&error);
        warn!(%message, "Launch failed");
        self.notifier.notify(NOTICE_TITLE, &message);
        error
    }
}
