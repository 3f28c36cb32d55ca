//! Error handling for gt.
//! Defines the error kinds a render can fail with and the result alias used
//! throughout the crate.

use std::io;
use thiserror::Error;

use crate::template::{ExecError, ParseError};

/// Custom error types for gt operations.
///
/// The first three variants are the failures of a render call. `IoError` only
/// comes from the command-line shim while acquiring the input buffers.
#[derive(Error, Debug)]
pub enum Error {
    /// The data buffer is not valid JSON
    #[error("Data parse error: {0}")]
    DataParseError(#[from] serde_json::Error),

    /// The template source does not parse
    #[error("Template parse error: {0}")]
    TemplateParseError(#[from] ParseError),

    /// A fault while evaluating the template against the data
    #[error("Render execution error: {0}")]
    RenderExecutionError(#[from] ExecError),

    /// Represents errors that occur while reading template or data input
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
