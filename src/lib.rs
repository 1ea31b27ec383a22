//! cigen inspects a project directory, guesses its build ecosystem from
//! marker files and renders a Dockerfile, a Jenkinsfile and a GitLab CI file
//! from static templates.

/// Static template bundles keyed by ecosystem
pub mod bundle;

/// Command-line interface module for cigen
pub mod cli;

/// Settings read from environment variables
pub mod config;

pub mod constants;

/// Marker-file based ecosystem detection
pub mod detector;

/// Error types and handling for cigen
pub mod error;

/// Templates directory lookup and template reading
pub mod loader;

pub mod logger;

/// Core generation orchestration
/// Combines all components to produce the output directory
pub mod processor;

/// Summary of a run, written to report.txt
pub mod report;

/// Placeholder substitution
pub mod renderer;
