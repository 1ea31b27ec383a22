//! Core generation pipeline.
//! Detects the project, picks a bundle, renders each artifact and writes the
//! results plus a report into the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::bundle::{select_bundle, Artifact, TemplateBundle};
use crate::config::Settings;
use crate::detector::{detect, Ecosystem};
use crate::error::{Error, Result};
use crate::loader::read_template;
use crate::renderer::{build_context, PlaceholderRenderer, RenderContext, TemplateRenderer};
use crate::report::{Report, NO_TEMPLATE_NOTICE};

/// What happened to a single artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOutcome {
    /// The rendered file was written to `target`.
    Written { target: PathBuf },
    /// The template did not exist, so nothing was written.
    TemplateMissing { template: PathBuf },
}

/// Renders and writes artifacts for one bundle.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    bundle: &'a TemplateBundle,
    templates_root: &'a Path,
    output_root: &'a Path,
    context: &'a RenderContext,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        bundle: &'a TemplateBundle,
        templates_root: &'a Path,
        output_root: &'a Path,
        context: &'a RenderContext,
    ) -> Self {
        Self {
            engine,
            bundle,
            templates_root,
            output_root,
            context,
        }
    }

    /// Renders `artifact` and writes it, overwriting any previous output.
    ///
    /// # Errors
    /// * Template read failures other than "not found"
    /// * Any failure writing the output file
    pub fn process(&self, artifact: Artifact) -> Result<ArtifactOutcome> {
        let template = self.bundle.template_path(self.templates_root, artifact);
        debug!("Rendering {} from {}", artifact, template.display());

        let Some(content) = read_template(&template)? else {
            return Ok(ArtifactOutcome::TemplateMissing { template });
        };

        let rendered = self.engine.render(&content, self.context)?;
        let target = self.output_root.join(artifact.output_name());
        fs::write(&target, rendered)?;
        Ok(ArtifactOutcome::Written { target })
    }
}

/// Inputs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub project_root: PathBuf,
    pub templates_root: PathBuf,
    pub output_dir: PathBuf,
    pub settings: Settings,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct Generation {
    pub ecosystem: Ecosystem,
    /// One entry per artifact, in generation order.
    pub outcomes: Vec<(Artifact, ArtifactOutcome)>,
    pub report: Report,
}

/// Creates the output directory, refusing the project root itself.
///
/// Generated files inside the project root would show up in the next run's
/// root listing, so the output must live elsewhere.
///
/// # Errors
/// * `Error::ConfigError` if `output_dir` resolves to `project_root`
/// * `Error::IoError` if the directory cannot be created
pub fn ensure_output_dir(project_root: &Path, output_dir: &Path) -> Result<()> {
    if let (Ok(root), Ok(output)) = (fs::canonicalize(project_root), fs::canonicalize(output_dir)) {
        if root == output {
            return Err(Error::ConfigError(format!(
                "output directory '{}' is the project root",
                output_dir.display()
            )));
        }
    }
    fs::create_dir_all(output_dir)?;
    Ok(())
}

/// Runs the whole pipeline and writes `report.txt`.
///
/// Missing templates are recorded in the returned report. Filesystem write
/// failures abort the run.
pub fn generate(options: &GenerateOptions) -> Result<Generation> {
    ensure_output_dir(&options.project_root, &options.output_dir)?;

    let detection = detect(&options.project_root);
    let mut report = Report::new();
    report.record_detection(&detection);

    let bundle = select_bundle(detection.ecosystem);
    if bundle.is_generic() {
        report.push(NO_TEMPLATE_NOTICE);
    }

    let context = build_context(bundle, &detection, &options.settings);
    debug!("Render context: {context:?}");

    let engine = PlaceholderRenderer::new()?;
    let processor = Processor::new(
        &engine,
        bundle,
        &options.templates_root,
        &options.output_dir,
        &context,
    );

    let mut outcomes = Vec::with_capacity(Artifact::ALL.len());
    for artifact in Artifact::ALL {
        let outcome = processor.process(artifact)?;
        match &outcome {
            ArtifactOutcome::Written { target } => report.record_written(target),
            ArtifactOutcome::TemplateMissing { template } => {
                info!("Template for {} not found: {}", artifact, template.display());
                report.record_missing(artifact, template);
            }
        }
        outcomes.push((artifact, outcome));
    }

    let report_path = report.write_to(&options.output_dir)?;
    debug!("Report written to {}", report_path.display());
    Ok(Generation {
        ecosystem: detection.ecosystem,
        outcomes,
        report,
    })
}
