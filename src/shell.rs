//! Intermediary command interpreter used to start the target program.
//!
//! The interpreter is started with all three standard streams piped and no
//! window, then receives a single command line on its input.

use std::ffi::OsString;
use std::io;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::debug;

/// Hides the console window of the spawned interpreter.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Which interpreter binary to run and how.
#[derive(Debug, Clone)]
pub struct ShellSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ShellSpec {
    /// The platform command interpreter: `cmd.exe` on Windows, `sh` elsewhere.
    ///
    /// Both accept `"<target>" args&exit` as an input line.
    pub fn system() -> Self {
        let program = if cfg!(windows) { "cmd.exe" } else { "sh" };
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }
}

/// A running interpreter owned by a single launch attempt.
#[derive(Debug)]
pub struct ShellProcess {
    child: Child,
}

impl ShellProcess {
    /// Spawns the interpreter with redirected streams.
    pub fn start(spec: &ShellSpec) -> io::Result<Self> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let child = command.spawn()?;
        Ok(Self { child })
    }

    /// OS process id, if the child has not been reaped yet.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Writes `line` followed by a newline to the interpreter's input.
    pub async fn send_line(&mut self, line: &str) -> io::Result<()> {
        let stdin = self
            .child
            .stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "shell stdin is closed"))?;
        stdin.write_all(line.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await
    }

    /// Kills the interpreter without waiting for it.
    pub fn abandon(mut self) {
        if let Err(e) = self.child.start_kill() {
            debug!(error = %e, "shell already gone");
        }
    }
}
