//! Configuration loading for conf-launcher.
//!
//! The launcher is configured by a plain text file sitting next to its own
//! executable, named after it with a `.conf` suffix. The first non-empty line
//! is the target program, every following non-empty line is one argument.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffix appended to the launcher's own executable path.
pub const CONFIG_SUFFIX: &str = ".conf";

const UTF8_BOM: char = '\u{feff}';

/// Errors raised while locating or reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read configuration file: {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration file has no entries: {}", path.display())]
    Empty { path: PathBuf },

    #[error("Failed to resolve the launcher's own executable path")]
    ExecutablePath(#[source] io::Error),
}

/// Target program and its positional arguments, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Path of the program to start (line 0)
    pub target: String,
    /// Arguments passed through verbatim (lines 1..N)
    pub args: Vec<String>,
}

impl LaunchConfig {
    /// Splits loaded lines into the target and its arguments.
    ///
    /// `path` is only used to report which file turned out to be empty.
    pub fn from_lines(mut lines: Vec<String>, path: &Path) -> Result<Self, ConfigError> {
        if lines.is_empty() {
            return Err(ConfigError::Empty { path: path.to_path_buf() });
        }
        let args = lines.split_off(1);
        let target = lines.remove(0);
        Ok(Self { target, args })
    }

    /// Reads and splits the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let lines = read_lines(path)?;
        Self::from_lines(lines, path)
    }
}

/// Returns `<exe>.conf` for the given executable path.
pub fn config_path_for(exe: &Path) -> PathBuf {
    let mut path = exe.as_os_str().to_owned();
    path.push(CONFIG_SUFFIX);
    PathBuf::from(path)
}

/// Returns the configuration path derived from the running executable.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ExecutablePath)?;
    Ok(config_path_for(&exe))
}

/// Reads the non-empty lines of `path` in file order.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ConfigError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::Missing { path: path.to_path_buf() },
        _ => ConfigError::Unreadable { path: path.to_path_buf(), source },
    })?;

    let text = String::from_utf8_lossy(&bytes);
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(&*text);

    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect())
}
