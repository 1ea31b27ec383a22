//! Static template bundles, one per ecosystem.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::detector::Ecosystem;

/// One of the three generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Docker,
    Jenkins,
    GitLab,
}

impl Artifact {
    /// All artifacts, in generation order.
    pub const ALL: [Artifact; 3] = [Artifact::Docker, Artifact::Jenkins, Artifact::GitLab];

    /// Short name used in report lines.
    pub fn key(&self) -> &'static str {
        match self {
            Artifact::Docker => "docker",
            Artifact::Jenkins => "jenkins",
            Artifact::GitLab => "gitlab",
        }
    }

    /// File name of the artifact inside the output directory.
    pub fn output_name(&self) -> &'static str {
        match self {
            Artifact::Docker => "Dockerfile",
            Artifact::Jenkins => "Jenkinsfile",
            Artifact::GitLab => ".gitlab-ci.yml",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Template paths and default commands for one ecosystem.
///
/// Template paths are relative to the templates root.
#[derive(Debug, PartialEq, Eq)]
pub struct TemplateBundle {
    pub docker: &'static str,
    pub jenkins: &'static str,
    pub gitlab: &'static str,
    pub build_cmd: &'static str,
    pub test_cmd: &'static str,
    pub cache_dir: &'static str,
}

impl TemplateBundle {
    pub fn template(&self, artifact: Artifact) -> &'static str {
        match artifact {
            Artifact::Docker => self.docker,
            Artifact::Jenkins => self.jenkins,
            Artifact::GitLab => self.gitlab,
        }
    }

    /// Resolves the template for `artifact` against `templates_root`.
    pub fn template_path<P: AsRef<Path>>(&self, templates_root: P, artifact: Artifact) -> PathBuf {
        templates_root.as_ref().join(self.template(artifact))
    }

    /// Whether this is the fallback bundle for unrecognised projects.
    pub fn is_generic(&self) -> bool {
        std::ptr::eq(self, &GENERIC)
    }
}

pub static JAVA: TemplateBundle = TemplateBundle {
    docker: "docker/Dockerfile.java",
    jenkins: "jenkins/Jenkinsfile.java",
    gitlab: "gitlab/.gitlab-ci.java.yml",
    build_cmd: "mvn -B -DskipTests=false clean package",
    test_cmd: "mvn test",
    cache_dir: "~/.m2/repository",
};

pub static GO: TemplateBundle = TemplateBundle {
    docker: "docker/Dockerfile.go",
    jenkins: "jenkins/Jenkinsfile.go",
    gitlab: "gitlab/.gitlab-ci.go.yml",
    build_cmd: "go build -v ./...",
    test_cmd: "go test ./...",
    cache_dir: "$GOMODCACHE",
};

pub static NODE: TemplateBundle = TemplateBundle {
    docker: "docker/Dockerfile.node",
    jenkins: "jenkins/Jenkinsfile.node",
    gitlab: "gitlab/.gitlab-ci.node.yml",
    build_cmd: "npm ci && npm run build || true",
    test_cmd: "npm test",
    cache_dir: "~/.npm",
};

pub static PYTHON: TemplateBundle = TemplateBundle {
    docker: "docker/Dockerfile.python",
    jenkins: "jenkins/Jenkinsfile.python",
    gitlab: "gitlab/.gitlab-ci.python.yml",
    build_cmd: "python -m pip install -r requirements.txt --user",
    test_cmd: "pytest -q",
    cache_dir: "~/.cache/pip",
};

pub static GENERIC: TemplateBundle = TemplateBundle {
    docker: "docker/Dockerfile.generic",
    jenkins: "jenkins/Jenkinsfile.generic",
    gitlab: "gitlab/.gitlab-ci.generic.yml",
    build_cmd: "echo \"No build configured\"",
    test_cmd: "echo \"No tests configured\"",
    cache_dir: "",
};

/// Returns the bundle for `ecosystem`, falling back to [`GENERIC`].
pub fn select_bundle(ecosystem: Ecosystem) -> &'static TemplateBundle {
    match ecosystem {
        Ecosystem::Java => &JAVA,
        Ecosystem::Go => &GO,
        Ecosystem::Node => &NODE,
        Ecosystem::Python => &PYTHON,
        Ecosystem::Unknown => &GENERIC,
    }
}
