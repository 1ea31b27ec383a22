//! The run summary written to `report.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle::Artifact;
use crate::detector::DetectionResult;
use crate::error::Result;

/// Line appended when no bundle exists for the detected ecosystem.
pub const NO_TEMPLATE_NOTICE: &str =
    "No built-in template for detected language. Provide justification to add support.";

/// Ordered, human-readable lines describing one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Into<String>>(&mut self, line: S) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Records the detected ecosystem, root listing, details and warnings.
    pub fn record_detection(&mut self, detection: &DetectionResult) {
        self.push(format!("language: {}", detection.ecosystem));
        self.push(format!("found_files: {}", detection.found_files.join(", ")));
        for (key, value) in &detection.details {
            self.push(format!("detail {key}: {value}"));
        }
        for warning in &detection.warnings {
            self.push(format!("warning: {warning}"));
        }
    }

    pub fn record_written(&mut self, target: &Path) {
        self.push(format!("Wrote {}", target.display()));
    }

    pub fn record_missing(&mut self, artifact: Artifact, template: &Path) {
        self.push(format!(
            "Template for {} not found: {}",
            artifact,
            template.display()
        ));
    }

    /// Writes the report into `output_dir` and returns the file path.
    pub fn write_to<P: AsRef<Path>>(&self, output_dir: P) -> Result<PathBuf> {
        let path = output_dir.as_ref().join(crate::constants::REPORT_FILE);
        fs::write(&path, self.to_string())?;
        Ok(path)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
