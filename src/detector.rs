//! Project ecosystem detection.
//! Classifies a project root by its marker files and pulls a few best-effort
//! details out of the matching manifest.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::constants::details;
use crate::error::{Error, Result};

/// The closed set of ecosystems cigen knows how to generate files for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    Java,
    Go,
    Node,
    Python,
    Unknown,
}

impl Ecosystem {
    /// Tag used in the report and in template file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Java => "java",
            Ecosystem::Go => "go",
            Ecosystem::Node => "node",
            Ecosystem::Python => "python",
            Ecosystem::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker files in priority order. The first group with a file present wins.
pub const MARKERS: [(Ecosystem, &[&str]); 4] = [
    (Ecosystem::Java, &["pom.xml", "build.gradle", "build.gradle.kts"]),
    (Ecosystem::Go, &["go.mod"]),
    (Ecosystem::Node, &["package.json"]),
    (Ecosystem::Python, &["pyproject.toml", "requirements.txt", "setup.py"]),
];

/// Outcome of inspecting a project root.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub ecosystem: Ecosystem,
    /// Extracted manifest details, keyed by placeholder name.
    pub details: IndexMap<String, String>,
    /// Regular files at the project root, sorted by name.
    pub found_files: Vec<String>,
    /// Problems hit while extracting details. They never fail detection.
    pub warnings: Vec<String>,
}

impl DetectionResult {
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

/// Inspects `root` and classifies the project.
///
/// Never fails: an unreadable root yields an empty listing and `Unknown`,
/// and manifest problems become entries in [`DetectionResult::warnings`].
pub fn detect<P: AsRef<Path>>(root: P) -> DetectionResult {
    let root = root.as_ref();
    let found_files = list_root_files(root);
    let ecosystem = classify(root);
    debug!("Detected ecosystem '{}' in {}", ecosystem, root.display());

    let mut result = DetectionResult {
        ecosystem,
        details: IndexMap::new(),
        found_files,
        warnings: Vec::new(),
    };

    let extracted = match ecosystem {
        Ecosystem::Java => java_details(root),
        Ecosystem::Go => go_details(root),
        Ecosystem::Node => node_details(root),
        Ecosystem::Python => python_details(root),
        Ecosystem::Unknown => Ok(Vec::new()),
    };

    match extracted {
        Ok(pairs) => {
            for (key, value) in pairs {
                debug!("Found detail {key} = {value}");
                result.details.insert(key.to_string(), value);
            }
        }
        Err(e) => {
            warn!("{e}");
            result.warnings.push(e.to_string());
        }
    }

    result
}

/// Returns the highest-priority ecosystem whose marker exists under `root`.
pub fn classify(root: &Path) -> Ecosystem {
    MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| root.join(m).is_file()))
        .map(|(ecosystem, _)| *ecosystem)
        .unwrap_or(Ecosystem::Unknown)
}

fn list_root_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Cannot list {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files
}

/// Reads a manifest leniently: invalid UTF-8 is replaced rather than rejected.
fn read_manifest(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        Error::DetectionError(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn capture(pattern: &str, haystack: &str) -> Result<Option<String>> {
    let re = Regex::new(pattern)?;
    Ok(re
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string()))
}

type Details = Vec<(&'static str, String)>;

fn java_details(root: &Path) -> Result<Details> {
    let pom = root.join("pom.xml");
    let version = if pom.is_file() {
        let content = read_manifest(&pom)?;
        match capture(
            r"<maven\.compiler\.source>([^<]+)</maven\.compiler\.source>",
            &content,
        )? {
            Some(v) => Some(v),
            None => capture(r"<java\.version>([^<]+)</java\.version>", &content)?,
        }
    } else {
        let gradle = ["build.gradle", "build.gradle.kts"]
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file());
        match gradle {
            Some(path) => gradle_java_version(&read_manifest(&path)?)?,
            None => None,
        }
    };
    Ok(version
        .map(|v| vec![(details::JAVA_VERSION, v)])
        .unwrap_or_default())
}

/// Matches `sourceCompatibility = '17'`, `JavaVersion.VERSION_17` and
/// `JavaLanguageVersion.of(17)`.
fn gradle_java_version(content: &str) -> Result<Option<String>> {
    match capture(
        r#"sourceCompatibility\s*=\s*['"]?(?:JavaVersion\.VERSION_)?([0-9][0-9_.]*)"#,
        content,
    )? {
        Some(v) => Ok(Some(v.replace('_', "."))),
        None => capture(r"JavaLanguageVersion\.of\(\s*([0-9]+)\s*\)", content),
    }
}

fn go_details(root: &Path) -> Result<Details> {
    let content = read_manifest(&root.join("go.mod"))?;
    let mut found = Vec::new();
    if let Some(module) = capture(r"(?m)^\s*module\s+(\S+)", &content)? {
        found.push((details::GO_MODULE, module.trim_matches('"').to_string()));
    }
    if let Some(version) = capture(r"(?m)^\s*go\s+(\S+)", &content)? {
        found.push((details::GO_VERSION, version));
    }
    Ok(found)
}

/// The parts of `package.json` cigen cares about. Fields stay untyped so a
/// badly shaped one does not hide the others.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PackageManifest {
    name: Option<serde_json::Value>,
    scripts: Option<serde_json::Value>,
    engines: Option<serde_json::Value>,
}

fn node_details(root: &Path) -> Result<Details> {
    let path = root.join("package.json");
    let content = read_manifest(&path)?;
    let manifest: PackageManifest = serde_json::from_str(&content).map_err(|e| {
        Error::DetectionError(format!("cannot parse {}: {}", path.display(), e))
    })?;

    let mut found = Vec::new();
    let name = manifest
        .name
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .filter(|n| !n.trim().is_empty());
    if let Some(name) = name {
        found.push((details::PACKAGE_NAME, name.to_string()));
    }
    let engine = manifest
        .engines
        .as_ref()
        .and_then(|engines| engines.get("node"))
        .and_then(serde_json::Value::as_str);
    if let Some(engine) = engine {
        found.push((details::NODE_ENGINE, engine.to_string()));
    }
    let scripts = manifest
        .scripts
        .as_ref()
        .and_then(serde_json::Value::as_object)
        .filter(|scripts| !scripts.is_empty());
    if let Some(scripts) = scripts {
        let names: Vec<&str> = scripts.keys().map(String::as_str).collect();
        found.push((details::NODE_SCRIPTS, names.join(",")));
    }
    Ok(found)
}

fn python_details(root: &Path) -> Result<Details> {
    let pyproject = root.join("pyproject.toml");
    if !pyproject.is_file() {
        return Ok(Vec::new());
    }
    let content = read_manifest(&pyproject)?;
    Ok(capture(r#"python\s*=\s*"([^"]+)""#, &content)?
        .map(|v| vec![(details::PYTHON_REQUIRES, v)])
        .unwrap_or_default())
}
