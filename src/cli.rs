//! Command-line interface implementation for cigen.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for cigen.
#[derive(Parser, Debug)]
#[command(author, version, about = "cigen: generate Dockerfile, Jenkinsfile and GitLab CI from project detection", long_about = None)]
pub struct Args {
    /// Project directory to analyze (defaults to the current directory)
    #[arg(value_name = "PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Directory for generated files (defaults to PROJECT_DIR/.ci-generated)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory containing the docker/, jenkins/ and gitlab/ templates
    #[arg(short, long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
