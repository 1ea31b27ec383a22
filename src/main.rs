//! cigen's main application entry point.
//! Parses arguments, resolves paths and settings, and runs the generation
//! pipeline.

use cigen::{
    cli::{get_args, Args},
    config::Settings,
    constants::OUTPUT_DIR,
    error::{default_error_handler, Result},
    loader::locate_templates,
    logger::init_logger,
    processor::{generate, ArtifactOutcome, GenerateOptions},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the project, output and templates directories
/// 2. Reads settings from the environment
/// 3. Runs detection, rendering and writing
/// 4. Prints the report
fn run(args: Args) -> Result<()> {
    let exe = std::env::current_exe().unwrap_or_default();
    let templates_root = locate_templates(args.templates_dir.as_deref(), &exe);
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| args.project_dir.join(OUTPUT_DIR));

    let options = GenerateOptions {
        project_root: args.project_dir,
        templates_root,
        output_dir,
        settings: Settings::from_env(),
    };

    println!("Analyzing project in: {}", options.project_root.display());
    let generation = generate(&options)?;
    println!("Detected: {}", generation.ecosystem);

    for (artifact, outcome) in &generation.outcomes {
        match outcome {
            ArtifactOutcome::Written { target } => println!("Wrote: '{}'", target.display()),
            ArtifactOutcome::TemplateMissing { template } => {
                println!("Skipped {}: '{}' not found", artifact, template.display())
            }
        }
    }

    println!(
        "Generation completed. Files in {}",
        options.output_dir.display()
    );
    print!("{}", generation.report);
    Ok(())
}
