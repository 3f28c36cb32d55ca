//! Acquisition of the template and data buffers for the command line.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;

/// Where the data buffer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A data file named on the command line
    File(PathBuf),
    /// Data piped into standard input
    Stdin,
    /// No data file and an interactive terminal on stdin
    Terminal,
}

impl DataSource {
    /// Picks the data source for an optional data path.
    ///
    /// # Arguments
    /// * `data` - Data path given on the command line, if any
    /// * `stdin_is_terminal` - Whether standard input is an interactive terminal
    pub fn detect(data: Option<PathBuf>, stdin_is_terminal: bool) -> Self {
        match (data, stdin_is_terminal) {
            (Some(path), _) => DataSource::File(path),
            (None, false) => DataSource::Stdin,
            (None, true) => DataSource::Terminal,
        }
    }

    /// Same as [`DataSource::detect`] for the process's own stdin.
    pub fn from_args(data: Option<PathBuf>) -> Self {
        Self::detect(data, std::io::stdin().is_terminal())
    }

    /// Reads the data buffer.
    ///
    /// # Returns
    /// * `Some(bytes)` for a file or piped stdin, `None` for a terminal
    ///
    /// # Errors
    /// * `Error::IoError` if the file or stdin cannot be read
    pub fn load(&self) -> Result<Option<Vec<u8>>> {
        match self {
            DataSource::File(path) => read_file(path).map(Some),
            DataSource::Stdin => load_from_stdin().map(Some),
            DataSource::Terminal => Ok(None),
        }
    }
}

/// Reads a whole file as bytes.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!("Read {} byte(s) from {}", bytes.len(), path.display());
    Ok(bytes)
}

pub fn load_from_stdin() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    std::io::stdin().read_to_end(&mut buffer)?;
    debug!("Read {} byte(s) from stdin", buffer.len());
    Ok(buffer)
}
