//! Locating the templates directory and reading templates from it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::TEMPLATES_DIR;
use crate::error::{Error, Result};

/// Candidate template roots for an executable at `exe`, in search order.
pub fn candidate_roots(exe: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = exe
        .ancestors()
        .skip(1)
        .take(3)
        .map(|dir| dir.join(TEMPLATES_DIR))
        .collect();
    candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join(TEMPLATES_DIR));
    candidates
}

/// Picks the templates root.
///
/// An explicit directory is used as is. Otherwise the first existing
/// candidate wins; when none exists the first candidate is returned so that
/// every template is later reported as missing.
pub fn locate_templates(explicit: Option<&Path>, exe: &Path) -> PathBuf {
    if let Some(dir) = explicit {
        debug!("Using templates from {}", dir.display());
        return dir.to_path_buf();
    }

    let candidates = candidate_roots(exe);
    for candidate in &candidates {
        debug!("Looking for templates in {}", candidate.display());
        if candidate.is_dir() {
            return candidate.clone();
        }
    }
    candidates
        .into_iter()
        .next()
        .unwrap_or_else(|| PathBuf::from(TEMPLATES_DIR))
}

/// Reads a template, returning `None` when the file does not exist.
///
/// Invalid UTF-8 is replaced rather than rejected. Other read failures are
/// returned as `Error::TemplateError`.
pub fn read_template<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if path.exists() && !path.is_file() {
        return Ok(None);
    }
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::TemplateError(format!(
            "cannot read {}: {}",
            path.display(),
            e
        ))),
    }
}
