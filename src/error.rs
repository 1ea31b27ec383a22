//! Error handling for cigen.
//! Defines the error type and result alias used throughout the application.

use std::io;
use thiserror::Error;

/// Errors that can occur while generating CI files.
///
/// Only `IoError` is fatal in practice: detection errors are downgraded to
/// report warnings and missing templates become report lines.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur while loading or rendering a template
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents invalid settings or command-line input
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents a manifest that could not be read or understood
    #[error("Detection error: {0}.")]
    DetectionError(String),

    #[error("Regex error: {0}.")]
    RegexError(#[from] regex::Error),
}

/// Convenience type alias for Results with cigen's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
